use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::instrument;

/// A flat record indexed by the [`ContactIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Unique key
    pub email: String,
    pub name: String,
    pub age: u32,
    pub town: String,
}

impl Contact {
    pub fn new(email: &str, name: &str, age: u32, town: &str) -> Self {
        Self {
            email: email.to_string(),
            name: name.to_string(),
            age,
            town: town.to_string(),
        }
    }

    /// Part of the email after '@', empty when there is none.
    fn domain(&self) -> &str {
        self.email.split_once('@').map(|(_, d)| d).unwrap_or("")
    }
}

/// Multi-index lookup structure over contacts.
///
/// `by_email` owns the records; the secondary indexes hold emails only and
/// resolve through it. Pure indexing, no structural invariants beyond
/// index consistency: every mutation touches all five maps.
#[derive(Debug, Default)]
pub struct ContactIndex {
    by_email: HashMap<String, Contact>,
    by_domain: HashMap<String, BTreeSet<String>>,
    by_name_town: HashMap<(String, String), BTreeSet<String>>,
    by_age: BTreeMap<u32, BTreeSet<String>>,
    by_town_age: HashMap<String, BTreeMap<u32, BTreeSet<String>>>,
}

impl ContactIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_email.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_email.is_empty()
    }

    /// Inserts a contact into all indexes. Returns false when the email is
    /// already taken, leaving the indexes untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn add(&mut self, email: &str, name: &str, age: u32, town: &str) -> bool {
        if self.by_email.contains_key(email) {
            return false;
        }
        let contact = Contact::new(email, name, age, town);

        self.by_domain
            .entry(contact.domain().to_string())
            .or_default()
            .insert(email.to_string());
        self.by_name_town
            .entry((name.to_string(), town.to_string()))
            .or_default()
            .insert(email.to_string());
        self.by_age
            .entry(age)
            .or_default()
            .insert(email.to_string());
        self.by_town_age
            .entry(town.to_string())
            .or_default()
            .entry(age)
            .or_default()
            .insert(email.to_string());

        self.by_email.insert(email.to_string(), contact);
        true
    }

    /// Removes a contact from all indexes. Returns false when absent.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, email: &str) -> bool {
        let Some(contact) = self.by_email.remove(email) else {
            return false;
        };

        if let Some(set) = self.by_domain.get_mut(contact.domain()) {
            set.remove(email);
            if set.is_empty() {
                self.by_domain.remove(contact.domain());
            }
        }
        let name_town = (contact.name.clone(), contact.town.clone());
        if let Some(set) = self.by_name_town.get_mut(&name_town) {
            set.remove(email);
            if set.is_empty() {
                self.by_name_town.remove(&name_town);
            }
        }
        if let Some(set) = self.by_age.get_mut(&contact.age) {
            set.remove(email);
            if set.is_empty() {
                self.by_age.remove(&contact.age);
            }
        }
        if let Some(ages) = self.by_town_age.get_mut(&contact.town) {
            if let Some(set) = ages.get_mut(&contact.age) {
                set.remove(email);
                if set.is_empty() {
                    ages.remove(&contact.age);
                }
            }
            if ages.is_empty() {
                self.by_town_age.remove(&contact.town);
            }
        }
        true
    }

    pub fn find(&self, email: &str) -> Option<&Contact> {
        self.by_email.get(email)
    }

    /// All contacts whose email domain matches, ordered by email.
    pub fn find_by_domain(&self, domain: &str) -> Vec<&Contact> {
        self.resolve(self.by_domain.get(domain))
    }

    /// All contacts with the exact name and town, ordered by email.
    pub fn find_by_name_and_town(&self, name: &str, town: &str) -> Vec<&Contact> {
        self.resolve(
            self.by_name_town
                .get(&(name.to_string(), town.to_string())),
        )
    }

    /// All contacts with `start_age <= age <= end_age`, ordered by age then
    /// email.
    pub fn find_in_age_range(&self, start_age: u32, end_age: u32) -> Vec<&Contact> {
        self.by_age
            .range(start_age..=end_age)
            .flat_map(|(_, emails)| emails.iter().map(|e| &self.by_email[e]))
            .collect()
    }

    /// Age-range lookup narrowed to one town, ordered by age then email.
    /// An unknown town yields an empty result.
    pub fn find_in_age_range_in_town(
        &self,
        start_age: u32,
        end_age: u32,
        town: &str,
    ) -> Vec<&Contact> {
        let Some(ages) = self.by_town_age.get(town) else {
            return Vec::new();
        };
        ages.range(start_age..=end_age)
            .flat_map(|(_, emails)| emails.iter().map(|e| &self.by_email[e]))
            .collect()
    }

    fn resolve(&self, emails: Option<&BTreeSet<String>>) -> Vec<&Contact> {
        emails
            .into_iter()
            .flatten()
            .map(|e| &self.by_email[e])
            .collect()
    }
}
