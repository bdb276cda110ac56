pub mod all_students;
pub mod index;
pub mod sse;
