//! In-memory student store.

use serde::Deserialize;
use tracing::{debug, instrument};

use super::types::{seed_students, Student, StudentPayload};
use crate::error::RegistryError;

/// Rule used to assign ids to newly created students.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// `id = current length + 1`. Ids can repeat once a record is deleted.
    #[default]
    Count,
    /// Monotonic counter; an id is never handed out twice.
    Sequence,
}

impl std::fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdStrategy::Count => write!(f, "count"),
            IdStrategy::Sequence => write!(f, "sequence"),
        }
    }
}

/// Ordered collection of student records.
///
/// Lookups scan in insertion order and the first matching record wins.
#[derive(Debug, Clone)]
pub struct StudentStore {
    students: Vec<Student>,
    strategy: IdStrategy,
    /// Highest id ever handed out or seeded (used by `Sequence`).
    last_id: i64,
}

impl StudentStore {
    /// Create an empty store.
    pub fn new(strategy: IdStrategy) -> Self {
        Self::with_students(Vec::new(), strategy)
    }

    /// Create a store holding the two seed records.
    pub fn seeded(strategy: IdStrategy) -> Self {
        Self::with_students(seed_students(), strategy)
    }

    /// Create a store from existing records.
    pub fn with_students(students: Vec<Student>, strategy: IdStrategy) -> Self {
        let last_id = students.iter().map(|s| s.id).max().unwrap_or(0);
        Self {
            students,
            strategy,
            last_id,
        }
    }

    /// All records in current order.
    pub fn list(&self) -> &[Student] {
        &self.students
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// First record with the given id.
    pub fn find_by_id(&self, id: i64) -> Result<&Student, RegistryError> {
        self.students
            .iter()
            .find(|s| s.id == id)
            .ok_or(RegistryError::NotFound { id: Some(id) })
    }

    fn position(&self, id: i64) -> Result<usize, RegistryError> {
        self.students
            .iter()
            .position(|s| s.id == id)
            .ok_or(RegistryError::NotFound { id: Some(id) })
    }

    fn next_id(&self) -> i64 {
        match self.strategy {
            IdStrategy::Count => self.students.len() as i64 + 1,
            IdStrategy::Sequence => self.last_id + 1,
        }
    }

    /// Append a new record and return it.
    #[instrument(skip(self, payload), fields(strategy = %self.strategy))]
    pub fn append(&mut self, payload: StudentPayload) -> Student {
        let id = self.next_id();
        let student = Student::from_payload(id, payload);
        self.students.push(student.clone());
        self.last_id = self.last_id.max(id);
        debug!(id, len = self.students.len(), "Student appended");
        student
    }

    /// Replace the first record with `id`, keeping `id` as given.
    #[instrument(skip(self, payload))]
    pub fn replace_by_id(
        &mut self,
        id: i64,
        payload: StudentPayload,
    ) -> Result<&Student, RegistryError> {
        let index = self.position(id)?;
        self.students[index] = Student::from_payload(id, payload);
        debug!(index, "Student replaced");
        Ok(&self.students[index])
    }

    /// Remove the first record with `id`; later records shift left.
    #[instrument(skip(self))]
    pub fn remove_by_id(&mut self, id: i64) -> Result<Student, RegistryError> {
        let index = self.position(id)?;
        let removed = self.students.remove(index);
        debug!(index, len = self.students.len(), "Student removed");
        Ok(removed)
    }
}

impl Default for StudentStore {
    fn default() -> Self {
        Self::seeded(IdStrategy::default())
    }
}
