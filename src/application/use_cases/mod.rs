/// Use cases module containing application business logic orchestration
mod build_tree;

pub use build_tree::BuildTreeUseCase;
