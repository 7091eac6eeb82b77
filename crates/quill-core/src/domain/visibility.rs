use super::post::{Post, PostStatus};
use super::user::Principal;

/// Whether `viewer` may see `post`.
///
/// Published posts are public. Anything else is visible only to its author
/// and to admins; `None` is an anonymous reader.
pub fn can_view(post: &Post, viewer: Option<&Principal>) -> bool {
    if post.status == PostStatus::Published {
        return true;
    }
    viewer.is_some_and(|v| v.is_admin() || post.is_authored_by(v))
}
