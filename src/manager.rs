use tracing::{debug, error, warn};

use crate::calc::{self, ClassStatistics};
use crate::error::ValidationError;
use crate::store::SnapshotStore;
use crate::student::{Student, StudentRecord};

/// Fields an update may replace. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub class: Option<String>,
}

impl StudentUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.class.is_none()
    }
}

/// The roster: an ordered list of students with unique ids, mirrored to a
/// JSON snapshot after every successful mutation.
pub struct StudentManager {
    students: Vec<Student>,
    store: SnapshotStore,
    load_error: Option<String>,
    save_error: Option<String>,
}

impl StudentManager {
    /// Opens the roster backed by `store`.
    ///
    /// A missing snapshot is created empty. A snapshot that cannot be read, or
    /// that holds any invalid record, leaves the roster empty; the reason is
    /// logged and kept in [`StudentManager::load_error`].
    pub fn open(store: SnapshotStore) -> Self {
        let mut manager = Self {
            students: Vec::new(),
            store,
            load_error: None,
            save_error: None,
        };

        if let Err(e) = manager.store.ensure_dir() {
            manager.fail_load(e.to_string());
            return manager;
        }
        if !manager.store.exists() {
            manager.save();
            return manager;
        }

        match manager.load() {
            Ok(students) => manager.students = students,
            Err(reason) => manager.fail_load(reason),
        }
        manager
    }

    fn load(&self) -> Result<Vec<Student>, String> {
        let records = match self.store.read() {
            Ok(Some(records)) => records,
            Ok(None) => return Err("snapshot is not a JSON array".to_string()),
            Err(e) => return Err(e.to_string()),
        };

        let mut students: Vec<Student> = Vec::with_capacity(records.len());
        for (idx, record) in records.into_iter().enumerate() {
            let id = record.id.clone();
            let student = Student::from_record(record)
                .map_err(|e| format!("record {idx} (id {id:?}): {e}"))?;
            if students.iter().any(|s| s.id() == student.id()) {
                return Err(format!("record {idx}: duplicate student id {:?}", student.id()));
            }
            students.push(student);
        }
        debug!(count = students.len(), "roster loaded");
        Ok(students)
    }

    fn fail_load(&mut self, reason: String) {
        warn!(path = %self.store.path().display(), %reason, "failed to load students, starting empty");
        self.students.clear();
        self.load_error = Some(reason);
    }

    fn save(&mut self) {
        let records: Vec<StudentRecord> = self.students.iter().map(Student::to_record).collect();
        match self.store.write(&records) {
            Ok(()) => self.save_error = None,
            Err(e) => {
                error!(error = %e, "failed to save students");
                self.save_error = Some(e.to_string());
            }
        }
    }

    /// Why the startup load fell back to an empty roster, if it did.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// The most recent save failure, cleared once taken.
    pub fn take_save_error(&mut self) -> Option<String> {
        self.save_error.take()
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Appends `student`; returns `false` and changes nothing if the id is taken.
    pub fn add_student(&mut self, student: Student) -> bool {
        if self.find_student(student.id()).is_some() {
            return false;
        }
        self.students.push(student);
        self.save();
        true
    }

    pub fn remove_student(&mut self, id: &str) -> bool {
        let Some(idx) = self.students.iter().position(|s| s.id() == id) else {
            return false;
        };
        self.students.remove(idx);
        self.save();
        true
    }

    pub fn find_student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id() == id)
    }

    /// Applies the supplied fields to the student with `id`.
    ///
    /// Returns `Ok(false)` when no such student exists. All supplied fields are
    /// validated before any is applied. An update with no fields still counts
    /// as a success.
    pub fn update_student(
        &mut self,
        id: &str,
        update: StudentUpdate,
    ) -> Result<bool, ValidationError> {
        let Some(idx) = self.students.iter().position(|s| s.id() == id) else {
            return Ok(false);
        };

        let mut candidate = self.students[idx].clone();
        if let Some(name) = update.name.as_deref() {
            candidate.set_name(name)?;
        }
        if let Some(class) = update.class.as_deref() {
            candidate.set_class(class)?;
        }

        self.students[idx] = candidate;
        self.save();
        Ok(true)
    }

    /// Inserts or overwrites one grade of the student with `id` and saves.
    pub fn record_grade(
        &mut self,
        id: &str,
        subject: &str,
        score: f64,
    ) -> Result<bool, ValidationError> {
        let Some(student) = self.students.iter_mut().find(|s| s.id() == id) else {
            return Ok(false);
        };
        student.add_grade(subject, score)?;
        self.save();
        Ok(true)
    }

    pub fn all_students(&self) -> Vec<Student> {
        self.students.clone()
    }

    /// Up to `n` students by descending average; ties keep roster order.
    pub fn top_students(&self, n: usize) -> Vec<Student> {
        let mut ranked = self.students.clone();
        ranked.sort_by(|a, b| b.average().total_cmp(&a.average()));
        ranked.truncate(n);
        ranked
    }

    pub fn students_by_class(&self, class: &str) -> Vec<Student> {
        let wanted = class.trim().to_lowercase();
        if wanted.is_empty() {
            return Vec::new();
        }
        self.students
            .iter()
            .filter(|s| s.class().to_lowercase() == wanted)
            .cloned()
            .collect()
    }

    pub fn class_statistics(&self, class: &str) -> Option<ClassStatistics> {
        let members = self.students_by_class(class);
        let first = members.first()?;
        let averages: Vec<f64> = members.iter().map(Student::average).collect();
        calc::class_statistics(first.class(), &averages)
    }

    /// Distinct class labels, matched case-insensitively, sorted. The label
    /// stored on the first member of each class is the one returned.
    pub fn class_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        for s in &self.students {
            let key = s.class().to_lowercase();
            if !labels.iter().any(|l| l.to_lowercase() == key) {
                labels.push(s.class().to_string());
            }
        }
        labels.sort();
        labels
    }
}

impl std::fmt::Debug for StudentManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudentManager")
            .field("students", &self.students.len())
            .field("path", &self.store.path())
            .finish()
    }
}
