use crate::traceability::domain::ProductNode;

/// OwnershipClassifier policy separating local products from foreign ones
///
/// A foreign product belongs to another organization: the UI withholds its
/// detail and offers "request traceability" instead of "edit".
///
/// Rules:
/// 1. No caller organization known: every product is local
/// 2. Otherwise a product is foreign iff its owner differs from the caller
pub struct OwnershipClassifier;

impl OwnershipClassifier {
    /// Returns true when `node` is owned by someone other than the caller
    ///
    /// # Arguments
    /// * `node` - The product being rendered
    /// * `caller_organization_id` - Organization of the viewer, if any
    pub fn is_external(node: &ProductNode, caller_organization_id: Option<&str>) -> bool {
        match caller_organization_id {
            Some(organization) => node.owner_id != organization,
            // Fail open: without tenant context show everything as local
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_owner_is_local() {
        let shoe = ProductNode::new("shoe", "Shoe", "org-1");
        assert!(!OwnershipClassifier::is_external(&shoe, Some("org-1")));
    }

    #[test]
    fn test_other_owner_is_external() {
        let sole = ProductNode::new("sole", "Sole", "org-2");
        assert!(OwnershipClassifier::is_external(&sole, Some("org-1")));
    }

    #[test]
    fn test_without_caller_organization_everything_is_local() {
        let sole = ProductNode::new("sole", "Sole", "org-2");
        assert!(!OwnershipClassifier::is_external(&sole, None));
    }

    #[test]
    fn test_empty_owner_is_external_for_known_caller() {
        let orphan = ProductNode::new("orphan", "Orphan", "");
        assert!(OwnershipClassifier::is_external(&orphan, Some("org-1")));
    }
}
