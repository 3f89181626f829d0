use anyhow::Context;
use sqlx::PgPool;

use crate::utils::errors::AppError;

use super::model::{CreateGenreDto, Genre, UpdateGenreDto};

pub struct GenreService;

impl GenreService {
    pub async fn create_genre(db: &PgPool, dto: CreateGenreDto) -> Result<Genre, AppError> {
        let existing = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE name = $1")
            .bind(&dto.name)
            .fetch_optional(db)
            .await
            .context("Failed to check for existing genre")
            .map_err(AppError::database)?;

        if existing.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Genre with this name already exists"
            )));
        }

        sqlx::query_as::<_, Genre>("INSERT INTO genres (name) VALUES ($1) RETURNING id, name")
            .bind(&dto.name)
            .fetch_one(db)
            .await
            .context("Failed to insert genre")
            .map_err(AppError::database)
    }

    pub async fn get_genres(db: &PgPool) -> Result<Vec<Genre>, AppError> {
        sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name")
            .fetch_all(db)
            .await
            .context("Failed to fetch genres")
            .map_err(AppError::database)
    }

    pub async fn get_genre_by_id(db: &PgPool, genre_id: i32) -> Result<Genre, AppError> {
        sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(genre_id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch genre by id")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Genre not found")))
    }

    pub async fn update_genre(
        db: &PgPool,
        genre_id: i32,
        dto: UpdateGenreDto,
    ) -> Result<Genre, AppError> {
        sqlx::query_as::<_, Genre>("UPDATE genres SET name = $1 WHERE id = $2 RETURNING id, name")
            .bind(&dto.name)
            .bind(genre_id)
            .fetch_optional(db)
            .await
            .context("Failed to update genre")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Genre not found")))
    }

    pub async fn delete_genre(db: &PgPool, genre_id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(genre_id)
            .execute(db)
            .await
            .context("Failed to delete genre")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Genre not found")));
        }

        Ok(())
    }
}
