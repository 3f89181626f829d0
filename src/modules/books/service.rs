use std::collections::{BTreeSet, HashMap};

use anyhow::Context;
use sqlx::{PgPool, Postgres, Transaction};

use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationParams;

use super::model::{Book, BookResponse, CreateBookDto, UpdateBookDto};

pub struct BookService;

impl BookService {
    /// Resolves author full names and genre names for a set of books in two
    /// queries, regardless of page size.
    async fn load_relations(
        db: &PgPool,
        book_ids: &[i32],
    ) -> Result<(HashMap<i32, Vec<String>>, HashMap<i32, Vec<String>>), AppError> {
        if book_ids.is_empty() {
            return Ok((HashMap::new(), HashMap::new()));
        }

        let ids: Vec<i32> = book_ids.to_vec();

        let author_rows = sqlx::query_as::<_, (i32, String)>(
            "SELECT ba.book_id, a.name || ' ' || a.surname
             FROM book_authors ba
             JOIN authors a ON a.id = ba.author_id
             WHERE ba.book_id = ANY($1)
             ORDER BY a.surname, a.name",
        )
        .bind(&ids)
        .fetch_all(db)
        .await
        .context("Failed to fetch book authors")
        .map_err(AppError::database)?;

        let genre_rows = sqlx::query_as::<_, (i32, String)>(
            "SELECT bg.book_id, g.name
             FROM book_genres bg
             JOIN genres g ON g.id = bg.genre_id
             WHERE bg.book_id = ANY($1)
             ORDER BY g.name",
        )
        .bind(&ids)
        .fetch_all(db)
        .await
        .context("Failed to fetch book genres")
        .map_err(AppError::database)?;

        let mut authors: HashMap<i32, Vec<String>> = HashMap::new();
        for (book_id, name) in author_rows {
            authors.entry(book_id).or_default().push(name);
        }

        let mut genres: HashMap<i32, Vec<String>> = HashMap::new();
        for (book_id, name) in genre_rows {
            genres.entry(book_id).or_default().push(name);
        }

        Ok((authors, genres))
    }

    async fn to_responses(db: &PgPool, books: Vec<Book>) -> Result<Vec<BookResponse>, AppError> {
        let ids: Vec<i32> = books.iter().map(|b| b.id).collect();
        let (mut authors, mut genres) = Self::load_relations(db, &ids).await?;

        Ok(books
            .into_iter()
            .map(|book| BookResponse {
                authors: authors.remove(&book.id).unwrap_or_default(),
                genres: genres.remove(&book.id).unwrap_or_default(),
                id: book.id,
                title: book.title,
                description: book.description,
            })
            .collect())
    }

    async fn ensure_ids_exist(
        db: &PgPool,
        table: &str,
        ids: &[i32],
        label: &str,
    ) -> Result<Vec<i32>, AppError> {
        let unique: Vec<i32> = ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        if unique.is_empty() {
            return Ok(unique);
        }

        let query = format!("SELECT COUNT(*) FROM {} WHERE id = ANY($1)", table);
        let count = sqlx::query_scalar::<_, i64>(&query)
            .bind(&unique)
            .fetch_one(db)
            .await
            .context("Failed to validate relation ids")
            .map_err(AppError::database)?;

        if count != unique.len() as i64 {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Unknown {} id in request",
                label
            )));
        }

        Ok(unique)
    }

    async fn replace_links(
        tx: &mut Transaction<'_, Postgres>,
        book_id: i32,
        author_ids: Option<&[i32]>,
        genre_ids: Option<&[i32]>,
    ) -> Result<(), AppError> {
        if let Some(author_ids) = author_ids {
            sqlx::query("DELETE FROM book_authors WHERE book_id = $1")
                .bind(book_id)
                .execute(&mut **tx)
                .await
                .context("Failed to clear book authors")
                .map_err(AppError::database)?;

            for author_id in author_ids {
                sqlx::query("INSERT INTO book_authors (author_id, book_id) VALUES ($1, $2)")
                    .bind(author_id)
                    .bind(book_id)
                    .execute(&mut **tx)
                    .await
                    .context("Failed to link book author")
                    .map_err(AppError::database)?;
            }
        }

        if let Some(genre_ids) = genre_ids {
            sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
                .bind(book_id)
                .execute(&mut **tx)
                .await
                .context("Failed to clear book genres")
                .map_err(AppError::database)?;

            for genre_id in genre_ids {
                sqlx::query("INSERT INTO book_genres (genre_id, book_id) VALUES ($1, $2)")
                    .bind(genre_id)
                    .bind(book_id)
                    .execute(&mut **tx)
                    .await
                    .context("Failed to link book genre")
                    .map_err(AppError::database)?;
            }
        }

        Ok(())
    }

    pub async fn create_book(db: &PgPool, dto: CreateBookDto) -> Result<BookResponse, AppError> {
        let author_ids = Self::ensure_ids_exist(db, "authors", &dto.author_ids, "author").await?;
        let genre_ids = Self::ensure_ids_exist(db, "genres", &dto.genre_ids, "genre").await?;

        let mut tx = db
            .begin()
            .await
            .context("Failed to start transaction")
            .map_err(AppError::database)?;

        let book = sqlx::query_as::<_, Book>(
            "INSERT INTO books (title, description) VALUES ($1, $2)
             RETURNING id, title, description",
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .fetch_one(&mut *tx)
        .await
        .context("Failed to insert book")
        .map_err(AppError::database)?;

        Self::replace_links(&mut tx, book.id, Some(&author_ids), Some(&genre_ids)).await?;

        tx.commit()
            .await
            .context("Failed to commit book creation")
            .map_err(AppError::database)?;

        Self::get_book_by_id(db, book.id).await
    }

    pub async fn get_all_books(
        db: &PgPool,
        params: &PaginationParams,
    ) -> Result<(Vec<BookResponse>, i64), AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books")
            .fetch_one(db)
            .await
            .context("Failed to count books")
            .map_err(AppError::database)?;

        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, description FROM books ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(db)
        .await
        .context("Failed to fetch books")
        .map_err(AppError::database)?;

        Ok((Self::to_responses(db, books).await?, total))
    }

    pub async fn search_books(db: &PgPool, title: &str) -> Result<Vec<BookResponse>, AppError> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, description FROM books
             WHERE title ILIKE '%' || $1 || '%'
             ORDER BY id",
        )
        .bind(title)
        .fetch_all(db)
        .await
        .context("Failed to search books")
        .map_err(AppError::database)?;

        Self::to_responses(db, books).await
    }

    pub async fn get_book_by_id(db: &PgPool, book_id: i32) -> Result<BookResponse, AppError> {
        let book = sqlx::query_as::<_, Book>("SELECT id, title, description FROM books WHERE id = $1")
            .bind(book_id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch book by id")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Book not found")))?;

        Ok(Self::to_responses(db, vec![book]).await?.remove(0))
    }

    pub async fn update_book(
        db: &PgPool,
        book_id: i32,
        dto: UpdateBookDto,
    ) -> Result<BookResponse, AppError> {
        // 404 before any write
        Self::get_book_by_id(db, book_id).await?;

        let author_ids = match &dto.author_ids {
            Some(ids) => Some(Self::ensure_ids_exist(db, "authors", ids, "author").await?),
            None => None,
        };
        let genre_ids = match &dto.genre_ids {
            Some(ids) => Some(Self::ensure_ids_exist(db, "genres", ids, "genre").await?),
            None => None,
        };

        let mut tx = db
            .begin()
            .await
            .context("Failed to start transaction")
            .map_err(AppError::database)?;

        sqlx::query(
            "UPDATE books
             SET title = COALESCE($1, title),
                 description = COALESCE($2, description)
             WHERE id = $3",
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(book_id)
        .execute(&mut *tx)
        .await
        .context("Failed to update book")
        .map_err(AppError::database)?;

        Self::replace_links(&mut tx, book_id, author_ids.as_deref(), genre_ids.as_deref()).await?;

        tx.commit()
            .await
            .context("Failed to commit book update")
            .map_err(AppError::database)?;

        Self::get_book_by_id(db, book_id).await
    }

    pub async fn delete_book(db: &PgPool, book_id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(book_id)
            .execute(db)
            .await
            .context("Failed to delete book")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Book not found")));
        }

        Ok(())
    }

    /// Idempotent: favoriting a book twice is not an error.
    pub async fn add_favorite(db: &PgPool, user_id: i32, book_id: i32) -> Result<(), AppError> {
        // 404 for missing books rather than a foreign key violation
        Self::get_book_by_id(db, book_id).await?;

        sqlx::query(
            "INSERT INTO favorite_books (user_id, book_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(book_id)
        .execute(db)
        .await
        .context("Failed to add favorite")
        .map_err(AppError::database)?;

        Ok(())
    }

    pub async fn remove_favorite(db: &PgPool, user_id: i32, book_id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM favorite_books WHERE user_id = $1 AND book_id = $2")
            .bind(user_id)
            .bind(book_id)
            .execute(db)
            .await
            .context("Failed to remove favorite")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Book is not a favorite")));
        }

        Ok(())
    }

    pub async fn get_favorites(db: &PgPool, user_id: i32) -> Result<Vec<BookResponse>, AppError> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT b.id, b.title, b.description
             FROM books b
             JOIN favorite_books fb ON fb.book_id = b.id
             WHERE fb.user_id = $1
             ORDER BY b.id",
        )
        .bind(user_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch favorites")
        .map_err(AppError::database)?;

        Self::to_responses(db, books).await
    }
}
