//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::{Category as DomainCategory, PostStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub slug: String,
    pub title: String,
    pub category: Category,
    #[sea_orm(column_type = "Text")]
    pub excerpt: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub cover_image: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub author_id: String,
    pub author_name: String,
    pub author_email: String,
    pub status: Status,
    pub reading_time: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub published_at: Option<DateTimeWithTimeZone>,
}

/// Workflow status column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Status {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Category column, stored by display name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Category {
    #[sea_orm(string_value = "Maintenance Strategy")]
    MaintenanceStrategy,
    #[sea_orm(string_value = "Analytics & KPIs")]
    AnalyticsKpis,
    #[sea_orm(string_value = "Mobile Maintenance")]
    MobileMaintenance,
    #[sea_orm(string_value = "Finance & Planning")]
    FinancePlanning,
    #[sea_orm(string_value = "Asset Management")]
    AssetManagement,
    #[sea_orm(string_value = "Industry Insights")]
    IndustryInsights,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<PostStatus> for Status {
    fn from(status: PostStatus) -> Self {
        match status {
            PostStatus::Draft => Status::Draft,
            PostStatus::Pending => Status::Pending,
            PostStatus::Published => Status::Published,
            PostStatus::Rejected => Status::Rejected,
        }
    }
}

impl From<Status> for PostStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Draft => PostStatus::Draft,
            Status::Pending => PostStatus::Pending,
            Status::Published => PostStatus::Published,
            Status::Rejected => PostStatus::Rejected,
        }
    }
}

impl From<DomainCategory> for Category {
    fn from(category: DomainCategory) -> Self {
        match category {
            DomainCategory::MaintenanceStrategy => Category::MaintenanceStrategy,
            DomainCategory::AnalyticsKpis => Category::AnalyticsKpis,
            DomainCategory::MobileMaintenance => Category::MobileMaintenance,
            DomainCategory::FinancePlanning => Category::FinancePlanning,
            DomainCategory::AssetManagement => Category::AssetManagement,
            DomainCategory::IndustryInsights => Category::IndustryInsights,
        }
    }
}

impl From<Category> for DomainCategory {
    fn from(category: Category) -> Self {
        match category {
            Category::MaintenanceStrategy => DomainCategory::MaintenanceStrategy,
            Category::AnalyticsKpis => DomainCategory::AnalyticsKpis,
            Category::MobileMaintenance => DomainCategory::MobileMaintenance,
            Category::FinancePlanning => DomainCategory::FinancePlanning,
            Category::AssetManagement => DomainCategory::AssetManagement,
            Category::IndustryInsights => DomainCategory::IndustryInsights,
        }
    }
}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for quill_core::domain::Post {
    fn from(model: Model) -> Self {
        let tags = serde_json::from_value(model.tags).unwrap_or_else(|e| {
            tracing::warn!(post_id = %model.id, error = %e, "Ignoring malformed tags column");
            Vec::new()
        });

        Self {
            id: model.id,
            slug: model.slug,
            title: model.title,
            category: model.category.into(),
            excerpt: model.excerpt,
            content: model.content,
            cover_image: model.cover_image,
            tags,
            author_id: model.author_id,
            author_name: model.author_name,
            author_email: model.author_email,
            status: model.status.into(),
            reading_time: model.reading_time,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            published_at: model.published_at.map(Into::into),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<quill_core::domain::Post> for ActiveModel {
    fn from(post: quill_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            slug: Set(post.slug),
            title: Set(post.title),
            category: Set(post.category.into()),
            excerpt: Set(post.excerpt),
            content: Set(post.content),
            cover_image: Set(post.cover_image),
            tags: Set(Json::from(post.tags)),
            author_id: Set(post.author_id),
            author_name: Set(post.author_name),
            author_email: Set(post.author_email),
            status: Set(post.status.into()),
            reading_time: Set(post.reading_time),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
            published_at: Set(post.published_at.map(Into::into)),
        }
    }
}
