use serde::{Deserialize, Serialize};

/// Suspect profile tied to a crime-scene biometric hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspectRecord {
    pub name: String,
    pub id: String,
    pub fingerprint_details: String,
    pub last_known_location: String,
}

/// Read-only lookup table from biometric hash to suspect.
#[derive(Debug, Clone)]
pub struct SuspectDatabase {
    entries: Vec<(String, SuspectRecord)>,
}

impl SuspectDatabase {
    pub fn new(entries: Vec<(String, SuspectRecord)>) -> Self {
        Self { entries }
    }

    pub fn standard() -> Self {
        let entry = |hash: &str, name: &str, id: &str, fingerprint: &str, location: &str| {
            (
                hash.to_string(),
                SuspectRecord {
                    name: name.to_string(),
                    id: id.to_string(),
                    fingerprint_details: fingerprint.to_string(),
                    last_known_location: location.to_string(),
                },
            )
        };

        Self::new(vec![
            entry(
                "A1B2-C3D4-E5F6",
                "John Doe",
                "SUS101",
                "right thumb, whorl pattern",
                "East City",
            ),
            entry(
                "F7E8-D9C0-B1A2",
                "Jane Smith",
                "SUS102",
                "left index, loop pattern",
                "Northwood",
            ),
            entry(
                "1234-5678-ABCD",
                "Peter Jones",
                "SUS103",
                "right index, arch pattern",
                "Southville",
            ),
        ])
    }

    pub fn all(&self) -> Vec<&SuspectRecord> {
        self.entries.iter().map(|(_, record)| record).collect()
    }

    pub fn find_match(&self, crime_scene_hash: &str) -> Option<&SuspectRecord> {
        self.entries
            .iter()
            .find(|(hash, _)| hash == crime_scene_hash)
            .map(|(_, record)| record)
    }
}

impl Default for SuspectDatabase {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_exact_hash() {
        let database = SuspectDatabase::standard();
        let suspect = database
            .find_match("F7E8-D9C0-B1A2")
            .expect("hash is registered");
        assert_eq!(suspect.name, "Jane Smith");
        assert_eq!(suspect.id, "SUS102");
    }

    #[test]
    fn hash_lookup_is_exact() {
        let database = SuspectDatabase::standard();
        assert!(database.find_match("a1b2-c3d4-e5f6").is_none());
        assert!(database.find_match(" A1B2-C3D4-E5F6").is_none());
    }

    #[test]
    fn lists_suspects_in_registration_order() {
        let db = SuspectDatabase::standard();
        let ids: Vec<&str> = db
            .all()
            .into_iter()
            .map(|record| record.id.as_str())
            .collect();
        assert_eq!(ids, vec!["SUS101", "SUS102", "SUS103"]);
    }
}
