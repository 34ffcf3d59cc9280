use uuid::Uuid;

/// Generate a random v4 UUID rendered as a string, used for all row ids
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_unique_ids() {
        assert_ne!(generate_uuid(), generate_uuid());
    }
}
