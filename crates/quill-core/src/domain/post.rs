use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::composer;
use super::user::Principal;
use crate::error::DomainError;

/// Workflow state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Pending,
    Published,
    Rejected,
}

impl PostStatus {
    pub const ALL: [PostStatus; 4] = [
        PostStatus::Draft,
        PostStatus::Pending,
        PostStatus::Published,
        PostStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Pending => "pending",
            PostStatus::Published => "published",
            PostStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown post status: {s}")))
    }
}

/// Status an author may pick when saving: keep working or ask for review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetStatus {
    Draft,
    Pending,
}

impl From<TargetStatus> for PostStatus {
    fn from(target: TargetStatus) -> Self {
        match target {
            TargetStatus::Draft => PostStatus::Draft,
            TargetStatus::Pending => PostStatus::Pending,
        }
    }
}

/// Fixed set of blog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Maintenance Strategy")]
    MaintenanceStrategy,
    #[serde(rename = "Analytics & KPIs")]
    AnalyticsKpis,
    #[serde(rename = "Mobile Maintenance")]
    MobileMaintenance,
    #[serde(rename = "Finance & Planning")]
    FinancePlanning,
    #[serde(rename = "Asset Management")]
    AssetManagement,
    #[serde(rename = "Industry Insights")]
    IndustryInsights,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::MaintenanceStrategy,
        Category::AnalyticsKpis,
        Category::MobileMaintenance,
        Category::FinancePlanning,
        Category::AssetManagement,
        Category::IndustryInsights,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::MaintenanceStrategy => "Maintenance Strategy",
            Category::AnalyticsKpis => "Analytics & KPIs",
            Category::MobileMaintenance => "Mobile Maintenance",
            Category::FinancePlanning => "Finance & Planning",
            Category::AssetManagement => "Asset Management",
            Category::IndustryInsights => "Industry Insights",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown category: {s}")))
    }
}

/// Author-supplied fields of a post, as submitted by the compose form.
#[derive(Debug, Clone)]
pub struct PostInput {
    pub title: String,
    pub category: Category,
    pub excerpt: String,
    pub content: String,
    pub cover_image: Option<String>,
    pub tags: Vec<String>,
}

/// Post entity - a blog article moving through the moderation workflow.
///
/// `published_at` is set exactly when `status` is `Published`; `slug` and
/// `reading_time` always reflect the title and content of the last save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub category: Category,
    pub excerpt: String,
    pub content: String,
    pub cover_image: Option<String>,
    pub tags: Vec<String>,
    pub author_id: String,
    pub author_name: String,
    pub author_email: String,
    pub status: PostStatus,
    pub reading_time: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a new post authored by `author`, saved as a draft or sent
    /// straight to review.
    pub fn compose(
        input: PostInput,
        author: &Principal,
        target: TargetStatus,
    ) -> Result<Self, DomainError> {
        let composed = composer::compose(&input)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            slug: composed.slug,
            title: input.title.trim().to_string(),
            category: input.category,
            excerpt: input.excerpt.trim().to_string(),
            content: input.content,
            cover_image: input.cover_image,
            tags: composer::normalize_tags(input.tags),
            author_id: author.uid.clone(),
            author_name: author.display_name.clone(),
            author_email: author.email.clone(),
            status: target.into(),
            reading_time: composed.reading_time,
            created_at: now,
            updated_at: now,
            published_at: None,
        })
    }

    pub fn is_authored_by(&self, principal: &Principal) -> bool {
        self.author_id == principal.uid
    }

    /// Authors edit their own posts; admins edit anything.
    pub fn is_editable_by(&self, principal: &Principal) -> bool {
        principal.is_admin() || self.is_authored_by(principal)
    }

    /// Replace the author-supplied fields and recompute derived metadata.
    ///
    /// Status is left alone: editing a published post keeps it published
    /// with its original `published_at`.
    pub fn revise(&mut self, input: PostInput, actor: &Principal) -> Result<(), DomainError> {
        if !self.is_editable_by(actor) {
            return Err(DomainError::Unauthorized);
        }
        let composed = composer::compose(&input)?;

        self.slug = composed.slug;
        self.reading_time = composed.reading_time;
        self.title = input.title.trim().to_string();
        self.category = input.category;
        self.excerpt = input.excerpt.trim().to_string();
        self.content = input.content;
        self.cover_image = input.cover_image;
        self.tags = composer::normalize_tags(input.tags);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Draft or rejected -> pending.
    pub fn submit_for_review(&mut self, actor: &Principal) -> Result<(), DomainError> {
        if !self.is_editable_by(actor) {
            return Err(DomainError::Unauthorized);
        }
        match self.status {
            PostStatus::Draft | PostStatus::Rejected => {
                self.status = PostStatus::Pending;
                self.updated_at = Utc::now();
                Ok(())
            }
            from => Err(DomainError::InvalidTransition {
                from,
                action: "submit",
            }),
        }
    }

    /// Pending -> published. Admin only.
    pub fn approve(&mut self, actor: &Principal) -> Result<(), DomainError> {
        self.moderate(actor, "approve")?;
        let now = Utc::now();
        self.status = PostStatus::Published;
        self.published_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Pending -> rejected. Admin only.
    pub fn reject(&mut self, actor: &Principal) -> Result<(), DomainError> {
        self.moderate(actor, "reject")?;
        self.status = PostStatus::Rejected;
        self.updated_at = Utc::now();
        Ok(())
    }

    fn moderate(&self, actor: &Principal, action: &'static str) -> Result<(), DomainError> {
        if !actor.is_admin() {
            return Err(DomainError::Unauthorized);
        }
        if self.status != PostStatus::Pending {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                action,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    fn principal(uid: &str, role: Role) -> Principal {
        Principal {
            uid: uid.to_string(),
            email: format!("{uid}@example.com"),
            display_name: uid.to_string(),
            photo_url: None,
            role,
        }
    }

    fn input(title: &str) -> PostInput {
        PostInput {
            title: title.to_string(),
            category: Category::AssetManagement,
            excerpt: "Why it matters".to_string(),
            content: "Some body text".to_string(),
            cover_image: None,
            tags: vec!["cmms".to_string()],
        }
    }

    fn assert_publish_invariant(post: &Post) {
        assert_eq!(
            post.status == PostStatus::Published,
            post.published_at.is_some()
        );
    }

    #[test]
    fn test_compose_captures_author_and_target() {
        let author = principal("alice", Role::User);
        let post = Post::compose(input("Hello World!"), &author, TargetStatus::Pending).unwrap();

        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.status, PostStatus::Pending);
        assert_eq!(post.author_id, "alice");
        assert_eq!(post.author_email, "alice@example.com");
        assert_eq!(post.reading_time, "1 min read");
        assert_eq!(post.created_at, post.updated_at);
        assert_publish_invariant(&post);
    }

    #[test]
    fn test_only_admin_can_approve_or_reject() {
        let author = principal("alice", Role::User);
        let mut post = Post::compose(input("Title"), &author, TargetStatus::Pending).unwrap();

        assert!(matches!(
            post.approve(&author),
            Err(DomainError::Unauthorized)
        ));
        assert!(matches!(post.reject(&author), Err(DomainError::Unauthorized)));
        assert_eq!(post.status, PostStatus::Pending);
        assert_publish_invariant(&post);

        let admin = principal("root", Role::Admin);
        post.approve(&admin).unwrap();
        assert_eq!(post.status, PostStatus::Published);
        assert_publish_invariant(&post);
    }

    #[test]
    fn test_moderation_requires_pending() {
        let author = principal("alice", Role::User);
        let admin = principal("root", Role::Admin);
        let mut post = Post::compose(input("Title"), &author, TargetStatus::Draft).unwrap();

        let err = post.approve(&admin).unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidTransition {
                from: PostStatus::Draft,
                action: "approve"
            }
        ));
        assert_eq!(post.status, PostStatus::Draft);
    }

    #[test]
    fn test_rejected_post_can_be_revised_and_resubmitted() {
        let author = principal("alice", Role::User);
        let admin = principal("root", Role::Admin);
        let mut post = Post::compose(input("Title"), &author, TargetStatus::Pending).unwrap();
        post.reject(&admin).unwrap();

        post.revise(input("Better Title"), &author).unwrap();
        assert_eq!(post.status, PostStatus::Rejected);
        assert_eq!(post.slug, "better-title");

        post.submit_for_review(&author).unwrap();
        assert_eq!(post.status, PostStatus::Pending);
    }

    #[test]
    fn test_stranger_cannot_revise() {
        let author = principal("alice", Role::User);
        let stranger = principal("mallory", Role::User);
        let mut post = Post::compose(input("Title"), &author, TargetStatus::Draft).unwrap();
        let before = post.clone();

        assert!(matches!(
            post.revise(input("Hijacked"), &stranger),
            Err(DomainError::Unauthorized)
        ));
        assert!(matches!(
            post.submit_for_review(&stranger),
            Err(DomainError::Unauthorized)
        ));
        assert_eq!(post, before);
    }

    #[test]
    fn test_editing_published_post_keeps_publication() {
        let author = principal("alice", Role::User);
        let admin = principal("root", Role::Admin);
        let mut post = Post::compose(input("Title"), &author, TargetStatus::Pending).unwrap();
        post.approve(&admin).unwrap();
        let published_at = post.published_at;

        post.revise(input("Title, revised"), &author).unwrap();
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.published_at, published_at);
        assert!(post.submit_for_review(&author).is_err());
    }

    #[test]
    fn test_status_and_category_parse() {
        assert_eq!("pending".parse::<PostStatus>().unwrap(), PostStatus::Pending);
        assert!("archived".parse::<PostStatus>().is_err());
        assert_eq!(
            "Analytics & KPIs".parse::<Category>().unwrap(),
            Category::AnalyticsKpis
        );
        assert_eq!(
            serde_json::to_string(&Category::FinancePlanning).unwrap(),
            "\"Finance & Planning\""
        );
    }
}
