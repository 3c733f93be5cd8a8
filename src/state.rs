// src/state.rs

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::{
    config::Config,
    repositories::{AnswerRepository, QuestionRepository, StudentRepository, UserRepository},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub users: UserRepository,
    pub students: StudentRepository,
    pub questions: QuestionRepository,
    pub answers: AnswerRepository,
}

impl AppState {
    /// Builds every repository over the given pool.
    pub fn new(pool: PgPool, config: Config) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            students: StudentRepository::new(pool.clone()),
            questions: QuestionRepository::new(pool.clone()),
            answers: AnswerRepository::new(pool),
            config,
        }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for UserRepository {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for StudentRepository {
    fn from_ref(state: &AppState) -> Self {
        state.students.clone()
    }
}

impl FromRef<AppState> for QuestionRepository {
    fn from_ref(state: &AppState) -> Self {
        state.questions.clone()
    }
}

impl FromRef<AppState> for AnswerRepository {
    fn from_ref(state: &AppState) -> Self {
        state.answers.clone()
    }
}
