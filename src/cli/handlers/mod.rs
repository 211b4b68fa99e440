pub mod classes;
pub mod grades;
pub mod ranking;
pub mod report;
pub mod students;
