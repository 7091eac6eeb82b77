//! End-to-end workflow tests over the in-memory adapters.

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;

use quill_core::DomainError;
use quill_core::domain::{
    AdminAllowList, Category, PostInput, PostStatus, Principal, Role, TargetStatus,
    VerifiedIdentity,
};
use quill_core::ports::{BaseRepository, BlobError, BlobStore, PostRepository};
use quill_core::services::{AccountService, BlogService, CoverUpload, PostEventKind};

use crate::{InMemoryBlobStore, InMemoryPostRepository, InMemoryPubSub, InMemoryUserRepository};

struct Harness {
    posts: Arc<InMemoryPostRepository>,
    blobs: Arc<InMemoryBlobStore>,
    service: BlogService,
}

fn harness() -> Harness {
    let posts = Arc::new(InMemoryPostRepository::new());
    let blobs = Arc::new(InMemoryBlobStore::new("https://cdn.example.com"));
    let service = BlogService::new(
        posts.clone(),
        blobs.clone(),
        Arc::new(InMemoryPubSub::default()),
    );
    Harness {
        posts,
        blobs,
        service,
    }
}

struct FailingBlobStore;

#[async_trait]
impl BlobStore for FailingBlobStore {
    async fn upload(&self, _: &str, _: Vec<u8>, _: &str) -> Result<String, BlobError> {
        Err(BlobError::Backend("bucket unavailable".to_string()))
    }
}

fn allow_list() -> AdminAllowList {
    AdminAllowList::new(["editor@quill.dev"])
}

fn sign_in(uid: &str, email: &str) -> Principal {
    allow_list().authorize(VerifiedIdentity {
        uid: uid.to_string(),
        email: email.to_string(),
        display_name: Some(uid.to_string()),
        photo_url: None,
    })
}

fn author() -> Principal {
    sign_in("alice", "alice@example.com")
}

fn stranger() -> Principal {
    sign_in("bob", "bob@example.com")
}

fn admin() -> Principal {
    sign_in("editor", "editor@quill.dev")
}

fn input(title: &str, words: usize) -> PostInput {
    PostInput {
        title: title.to_string(),
        category: Category::MaintenanceStrategy,
        excerpt: "Why planned maintenance pays off".to_string(),
        content: vec!["word"; words].join(" "),
        cover_image: None,
        tags: vec!["cmms, reliability".to_string()],
    }
}

fn cover() -> CoverUpload {
    CoverUpload {
        file_name: "Plant Floor.png".to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
    }
}

#[tokio::test]
async fn test_create_then_approve_end_to_end() {
    let h = harness();
    assert_eq!(admin().role, Role::Admin);

    let post = h
        .service
        .create_post(input("Hello World!", 250), &author(), TargetStatus::Pending, None)
        .await
        .unwrap();

    assert_eq!(post.slug, "hello-world");
    assert_eq!(post.reading_time, "2 min read");
    assert_eq!(post.status, PostStatus::Pending);
    assert!(post.published_at.is_none());
    assert_eq!(post.tags, vec!["cmms", "reliability"]);

    let approved = h.service.approve(post.id, &admin()).await.unwrap();
    assert_eq!(approved.status, PostStatus::Published);
    assert!(approved.published_at.is_some());

    let stored = h.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.status, PostStatus::Published);
    assert_eq!(stored.published_at, approved.published_at);
}

#[tokio::test]
async fn test_author_cannot_moderate_own_post() {
    let h = harness();
    let post = h
        .service
        .create_post(input("Self Approval", 10), &author(), TargetStatus::Pending, None)
        .await
        .unwrap();

    for result in [
        h.service.approve(post.id, &author()).await,
        h.service.reject(post.id, &author()).await,
    ] {
        assert!(matches!(result, Err(DomainError::Unauthorized)));
    }
    assert!(matches!(
        h.service.delete(post.id, &author()).await,
        Err(DomainError::Unauthorized)
    ));

    let stored = h.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.status, PostStatus::Pending);
}

#[tokio::test]
async fn test_rejected_post_is_revised_and_resubmitted() {
    let h = harness();
    let post = h
        .service
        .create_post(input("First Try", 10), &author(), TargetStatus::Pending, None)
        .await
        .unwrap();
    h.service.reject(post.id, &admin()).await.unwrap();

    let revised = h
        .service
        .edit_post(post.id, input("Second Try", 450), &author(), None)
        .await
        .unwrap();
    assert_eq!(revised.status, PostStatus::Rejected);
    assert_eq!(revised.slug, "second-try");
    assert_eq!(revised.reading_time, "3 min read");

    let resubmitted = h.service.submit_for_review(post.id, &author()).await.unwrap();
    assert_eq!(resubmitted.status, PostStatus::Pending);
}

#[tokio::test]
async fn test_hidden_post_looks_missing_to_strangers() {
    let h = harness();
    let draft = h
        .service
        .create_post(input("Secret Draft", 10), &author(), TargetStatus::Draft, None)
        .await
        .unwrap();

    let hidden = h.service.get_by_slug("secret-draft", Some(&stranger())).await;
    let anonymous = h.service.get_by_slug("secret-draft", None).await;
    let absent = h.service.get_by_slug("never-written", None).await;
    for result in [hidden, anonymous, absent] {
        match result {
            Err(err) => assert_eq!(err.to_string(), "Post not found"),
            Ok(post) => panic!("leaked post {}", post.slug),
        }
    }

    // Editing someone else's hidden draft is reported the same way.
    assert!(matches!(
        h.service
            .edit_post(draft.id, input("Hijack", 5), &stranger(), None)
            .await,
        Err(DomainError::NotFound { .. })
    ));

    assert!(h.service.get_by_slug("secret-draft", Some(&author())).await.is_ok());
    assert!(h.service.get_by_id(draft.id, Some(&admin())).await.is_ok());
}

#[tokio::test]
async fn test_list_published_only_returns_published() {
    let h = harness();
    let a = h
        .service
        .create_post(input("Alpha", 10), &author(), TargetStatus::Pending, None)
        .await
        .unwrap();
    h.service
        .create_post(input("Beta", 10), &author(), TargetStatus::Pending, None)
        .await
        .unwrap();
    h.service
        .create_post(input("Gamma", 10), &author(), TargetStatus::Draft, None)
        .await
        .unwrap();
    h.service.approve(a.id, &admin()).await.unwrap();

    let published = h.service.list_published().await.unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].slug, "alpha");

    let mine = h.service.list_by_author(&author()).await.unwrap();
    assert_eq!(mine.len(), 3);
    assert!(h.service.list_by_author(&stranger()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_listing_and_stats() {
    let h = harness();
    let a = h
        .service
        .create_post(input("One", 10), &author(), TargetStatus::Pending, None)
        .await
        .unwrap();
    h.service
        .create_post(input("Two", 10), &author(), TargetStatus::Pending, None)
        .await
        .unwrap();
    h.service.reject(a.id, &admin()).await.unwrap();

    assert!(matches!(
        h.service.list_for_admin(&author(), None).await,
        Err(DomainError::Unauthorized)
    ));

    let pending = h
        .service
        .list_for_admin(&admin(), Some(PostStatus::Pending))
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].slug, "two");
    assert_eq!(h.service.list_for_admin(&admin(), None).await.unwrap().len(), 2);

    let stats = h.service.moderation_stats(&admin()).await.unwrap();
    assert_eq!(stats.pending, 1);
    assert_eq!(stats.rejected, 1);
    assert_eq!(stats.total(), 2);
}

#[tokio::test]
async fn test_colliding_titles_get_suffixed_slugs() {
    let h = harness();
    let first = h
        .service
        .create_post(input("Same Title", 10), &author(), TargetStatus::Draft, None)
        .await
        .unwrap();
    let second = h
        .service
        .create_post(input("Same  Title!", 10), &stranger(), TargetStatus::Draft, None)
        .await
        .unwrap();
    assert_eq!(first.slug, "same-title");
    assert_eq!(second.slug, "same-title-2");

    // Re-saving keeps the post's own slug.
    let resaved = h
        .service
        .edit_post(first.id, input("Same Title", 20), &author(), None)
        .await
        .unwrap();
    assert_eq!(resaved.slug, "same-title");
}

#[tokio::test]
async fn test_cover_upload_precedes_write() {
    let h = harness();
    let post = h
        .service
        .create_post(
            input("With Cover", 10),
            &author(),
            TargetStatus::Draft,
            Some(cover()),
        )
        .await
        .unwrap();

    let uri = post.cover_image.unwrap();
    assert!(uri.starts_with("https://cdn.example.com/blog-covers/"));
    assert!(uri.ends_with("-Plant-Floor.png"));
    assert_eq!(h.blobs.len().await, 1);
}

#[tokio::test]
async fn test_same_named_covers_keep_their_own_bytes() {
    let h = harness();
    let mut first = cover();
    first.bytes = b"first".to_vec();
    let mut second = cover();
    second.bytes = b"second".to_vec();

    let uri_a = h.service.upload_cover(&author(), first).await.unwrap();
    let uri_b = h.service.upload_cover(&stranger(), second).await.unwrap();

    assert_ne!(uri_a, uri_b);
    assert_eq!(h.blobs.len().await, 2);
    for (uri, expected) in [(&uri_a, b"first".to_vec()), (&uri_b, b"second".to_vec())] {
        let key = uri.strip_prefix("https://cdn.example.com/").unwrap();
        let (bytes, content_type) = h.blobs.get(key).await.unwrap();
        assert_eq!(bytes, expected);
        assert_eq!(content_type, "image/png");
    }
}

#[tokio::test]
async fn test_no_cover_is_stored_when_slug_cannot_be_resolved() {
    let h = harness();
    for _ in 0..100 {
        h.service
            .create_post(input("Crowded", 10), &author(), TargetStatus::Draft, None)
            .await
            .unwrap();
    }

    let result = h
        .service
        .create_post(
            input("Crowded", 10),
            &author(),
            TargetStatus::Draft,
            Some(cover()),
        )
        .await;

    assert!(matches!(result, Err(DomainError::Duplicate(_))));
    assert_eq!(h.blobs.len().await, 0);
}

#[tokio::test]
async fn test_failed_upload_persists_nothing() {
    let posts = Arc::new(InMemoryPostRepository::new());
    let service = BlogService::new(
        posts.clone(),
        Arc::new(FailingBlobStore),
        Arc::new(InMemoryPubSub::default()),
    );

    let result = service
        .create_post(
            input("Doomed", 10),
            &author(),
            TargetStatus::Pending,
            Some(cover()),
        )
        .await;

    assert!(matches!(result, Err(DomainError::Upload(_))));
    assert!(posts.find_by_slug("doomed").await.unwrap().is_none());
    assert_eq!(posts.count_by_status().await.unwrap().total(), 0);
}

#[tokio::test]
async fn test_non_image_cover_is_rejected() {
    let h = harness();
    let mut bad = cover();
    bad.content_type = "application/pdf".to_string();

    let result = h.service.upload_cover(&author(), bad).await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert_eq!(h.blobs.len().await, 0);
}

#[tokio::test]
async fn test_public_feed_only_sees_published_changes() {
    let h = harness();
    let mut public = h.service.subscribe(None).await.unwrap();
    let mut moderators = h.service.subscribe(Some(&admin())).await.unwrap();

    let post = h
        .service
        .create_post(input("Feed", 10), &author(), TargetStatus::Pending, None)
        .await
        .unwrap();
    h.service.approve(post.id, &admin()).await.unwrap();

    let first_admin = moderators.next().await.unwrap();
    assert_eq!(first_admin.kind, PostEventKind::Created);
    assert_eq!(first_admin.status, PostStatus::Pending);

    let first_public = public.next().await.unwrap();
    assert_eq!(first_public.kind, PostEventKind::Approved);
    assert_eq!(first_public.post_id, post.id);
}

#[tokio::test]
async fn test_sign_in_creates_then_refreshes_profile() {
    let users = Arc::new(InMemoryUserRepository::new());
    let accounts = AccountService::new(users.clone());

    let first = accounts.sign_in(&author()).await.unwrap();
    assert_eq!(first.role, Role::User);

    // Same uid, now on the allow-list: the stored role follows the live one.
    let promoted = sign_in("alice", "editor@quill.dev");
    let second = accounts.sign_in(&promoted).await.unwrap();
    assert_eq!(second.created_at, first.created_at);
    assert_eq!(second.role, Role::Admin);
    assert_eq!(second.email, "editor@quill.dev");

    let stored = users.find_by_id("alice".to_string()).await.unwrap().unwrap();
    assert_eq!(stored.role, Role::Admin);
}

#[tokio::test]
async fn test_admin_edits_another_authors_post() {
    let h = harness();
    let post = h
        .service
        .create_post(input("Torque Specs", 10), &author(), TargetStatus::Pending, None)
        .await
        .unwrap();

    let edited = h
        .service
        .edit_post(post.id, input("Torque Specs Revised", 400), &admin(), None)
        .await
        .unwrap();
    assert_eq!(edited.slug, "torque-specs-revised");
    assert_eq!(edited.reading_time, "2 min read");
    assert_eq!(edited.author_id, "alice");
    assert_eq!(edited.status, PostStatus::Pending);

    let result = h
        .service
        .edit_post(post.id, input("Hijacked", 10), &stranger(), None)
        .await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_hidden_post_still_holds_its_slug() {
    let h = harness();
    let draft = h
        .service
        .create_post(input("Field Notes", 10), &author(), TargetStatus::Draft, None)
        .await
        .unwrap();

    let other = h
        .service
        .create_post(input("Field Notes", 10), &stranger(), TargetStatus::Pending, None)
        .await
        .unwrap();
    assert_eq!(other.slug, "field-notes-2");

    let result = h.service.get_by_slug(&draft.slug, Some(&stranger())).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}
