//! Repository layer: one zero-sized struct per table.

pub mod attendance_repo;
pub mod class_repo;
pub mod school_repo;
pub mod session_repo;
pub mod student_repo;
pub mod subject_repo;
pub mod user_repo;

pub use attendance_repo::AttendanceRepo;
pub use class_repo::ClassRepo;
pub use school_repo::SchoolRepo;
pub use session_repo::SessionRepo;
pub use student_repo::StudentRepo;
pub use subject_repo::SubjectRepo;
pub use user_repo::UserRepo;
