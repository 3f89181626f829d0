use anyhow::Context;
use sqlx::PgPool;

use crate::utils::errors::AppError;

use super::model::{Author, CreateAuthorDto, UpdateAuthorDto};

pub struct AuthorService;

impl AuthorService {
    pub async fn create_author(db: &PgPool, dto: CreateAuthorDto) -> Result<Author, AppError> {
        sqlx::query_as::<_, Author>(
            "INSERT INTO authors (name, surname) VALUES ($1, $2) RETURNING id, name, surname",
        )
        .bind(&dto.name)
        .bind(&dto.surname)
        .fetch_one(db)
        .await
        .context("Failed to insert author")
        .map_err(AppError::database)
    }

    pub async fn get_authors(db: &PgPool) -> Result<Vec<Author>, AppError> {
        sqlx::query_as::<_, Author>("SELECT id, name, surname FROM authors ORDER BY surname, name")
            .fetch_all(db)
            .await
            .context("Failed to fetch authors")
            .map_err(AppError::database)
    }

    pub async fn get_author_by_id(db: &PgPool, author_id: i32) -> Result<Author, AppError> {
        sqlx::query_as::<_, Author>("SELECT id, name, surname FROM authors WHERE id = $1")
            .bind(author_id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch author by id")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Author not found")))
    }

    pub async fn update_author(
        db: &PgPool,
        author_id: i32,
        dto: UpdateAuthorDto,
    ) -> Result<Author, AppError> {
        sqlx::query_as::<_, Author>(
            "UPDATE authors
             SET name = COALESCE($1, name),
                 surname = COALESCE($2, surname)
             WHERE id = $3
             RETURNING id, name, surname",
        )
        .bind(&dto.name)
        .bind(&dto.surname)
        .bind(author_id)
        .fetch_optional(db)
        .await
        .context("Failed to update author")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Author not found")))
    }

    pub async fn delete_author(db: &PgPool, author_id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(author_id)
            .execute(db)
            .await
            .context("Failed to delete author")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Author not found")));
        }

        Ok(())
    }
}
