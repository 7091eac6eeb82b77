//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select};

use quill_core::domain::{Post, PostStatus, User};
use quill_core::error::RepoError;
use quill_core::ports::{PostOrder, PostRepository, StatusCounts, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// Mask an email for logging to avoid PII in logs.
pub(crate) fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next();
            match first {
                Some(c) if local.chars().count() > 1 => format!("{c}***@{domain}"),
                _ => format!("***@{domain}"),
            }
        }
        None => "***".to_string(),
    }
}

fn ordered(query: Select<PostEntity>, order: PostOrder) -> Select<PostEntity> {
    match order {
        PostOrder::PublishedAtDesc => query
            .order_by_desc(post::Column::PublishedAt)
            .order_by_desc(post::Column::CreatedAt),
        PostOrder::CreatedAtDesc => query.order_by_desc(post::Column::CreatedAt),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list_by_status(
        &self,
        status: PostStatus,
        order: PostOrder,
    ) -> Result<Vec<Post>, RepoError> {
        let query = PostEntity::find().filter(post::Column::Status.eq(post::Status::from(status)));
        let result = ordered(query, order)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self, order: PostOrder) -> Result<Vec<Post>, RepoError> {
        let result = ordered(PostEntity::find(), order)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_author(&self, author_id: &str) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_by_status(&self) -> Result<StatusCounts, RepoError> {
        let rows: Vec<(post::Status, i64)> = PostEntity::find()
            .select_only()
            .column(post::Column::Status)
            .column_as(Expr::col(post::Column::Id).count(), "count")
            .group_by(post::Column::Status)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let mut counts = StatusCounts::default();
        for (status, n) in rows {
            counts.add(status.into(), u64::try_from(n).unwrap_or(0));
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::mask_email;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("a@example.com"), "***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
