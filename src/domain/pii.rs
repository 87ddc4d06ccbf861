use serde::{Deserialize, Serialize};

/// Category-tagged detections reported by the oracle for one or more chunks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PiiDetected {
    pub names: Vec<String>,
    pub addresses: Vec<String>,
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub dates: Vec<String>,
    pub organizations: Vec<String>,
    pub other: Vec<String>,
}

impl PiiDetected {
    pub fn merge(&mut self, other: PiiDetected) {
        self.names.extend(other.names);
        self.addresses.extend(other.addresses);
        self.emails.extend(other.emails);
        self.phone_numbers.extend(other.phone_numbers);
        self.dates.extend(other.dates);
        self.organizations.extend(other.organizations);
        self.other.extend(other.other);
    }

    pub fn total(&self) -> usize {
        self.names.len()
            + self.addresses.len()
            + self.emails.len()
            + self.phone_numbers.len()
            + self.dates.len()
            + self.organizations.len()
            + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
