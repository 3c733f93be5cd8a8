// src/repositories/mod.rs

//! Thin row <-> record mappings, one per table. Each repository owns a clone
//! of the pool it was constructed with.

pub mod answer_repository;
pub mod question_repository;
pub mod student_repository;
pub mod user_repository;

pub use answer_repository::AnswerRepository;
pub use question_repository::QuestionRepository;
pub use student_repository::StudentRepository;
pub use user_repository::UserRepository;
