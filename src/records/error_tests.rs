//! Unit tests for record error types

#[cfg(test)]
mod tests {
    use crate::ErrorKind;
    use crate::records::error::RecordError;
    use crate::select::SelectError;

    #[test]
    fn test_duplicate_display() {
        let error = RecordError::Duplicate {
            table: "tag",
            name: "厂商".to_string(),
        };
        assert_eq!(error.to_string(), "tag '厂商' already exists");
        assert_eq!(error.kind(), ErrorKind::Duplicate);
    }

    #[test]
    fn test_not_found_display() {
        let error = RecordError::NotFound {
            table: "document type",
            id: 42,
        };
        assert_eq!(error.to_string(), "document type record 42 not found");
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_chip_error_keeps_kind() {
        let error = RecordError::from(SelectError::LimitReached { max: 20 });
        assert_eq!(error.kind(), ErrorKind::LimitReached);
        assert_eq!(
            error.to_string(),
            "invalid chip: at most 20 entries can be added"
        );
    }

    #[test]
    fn test_empty_display() {
        let error = RecordError::Empty { table: "tag" };
        assert_eq!(error.to_string(), "tag name cannot be empty");
        assert_eq!(error.kind(), ErrorKind::Empty);
    }
}
