//! Decides which posts a given viewer may see, and who may touch a record.
//!
//! All the read paths (index, category page, profile page, post detail) and
//! all the write paths (edit/delete of posts and comments) go through the
//! functions in this module, so the rules live in exactly one place:
//!
//! - a post is publicly visible once it is published, its publication date
//!   has passed, and its category (if any) is published too;
//! - authors always see their own posts, whatever their state;
//! - only a record's author may change or delete it.
//!
//! A post that fails the visibility check must be reported as missing, not
//! as forbidden, so that unpublished and future posts can't be probed for.

use crate::{categories::Category, comments::Comment, posts::Post, users::User};
use chrono::NaiveDateTime;

/// Anything that belongs to a single author.
pub trait Authored {
    fn author_id(&self) -> i32;
}

impl Authored for Post {
    fn author_id(&self) -> i32 {
        self.author_id
    }
}

impl Authored for Comment {
    fn author_id(&self) -> i32 {
        self.author_id
    }
}

/// What a list view is selecting over.
pub enum Scope<'a> {
    /// Every post on the site.
    Index,
    /// Posts filed under one category.
    Category(&'a Category),
    /// Posts written by one author.
    Profile(&'a User),
}

/// How much of the post set one request may see.
///
/// Resolved once per request instead of sprinkling author checks through
/// every query: `Owner` drops the visibility filter entirely, `Public`
/// applies the full predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewFilter {
    Owner,
    Public,
}

impl ViewFilter {
    /// Owners browsing their own profile see everything they wrote,
    /// drafts and future posts included. Every other scope gets the
    /// public filter, even for authenticated viewers.
    pub fn for_scope(viewer: Option<&User>, scope: &Scope<'_>) -> ViewFilter {
        match (viewer, scope) {
            (Some(user), Scope::Profile(owner)) if user.id == owner.id => ViewFilter::Owner,
            _ => ViewFilter::Public,
        }
    }
}

/// The public visibility predicate.
pub fn is_public(post: &Post, category: Option<&Category>, now: NaiveDateTime) -> bool {
    post.is_published
        && post.pub_date <= now
        && category.map(|c| c.is_published).unwrap_or(true)
}

/// Whether `viewer` may read `post`. Authors bypass the public predicate.
pub fn is_visible(
    viewer: Option<&User>,
    post: &Post,
    category: Option<&Category>,
    now: NaiveDateTime,
) -> bool {
    viewer.map(|u| u.id == post.author_id).unwrap_or(false)
        || is_public(post, category, now)
}

/// Whether `actor` may update or delete `record`.
pub fn can_modify<R: Authored>(actor: Option<&User>, record: &R) -> bool {
    actor.map(|u| u.id == record.author_id()).unwrap_or(false)
}

/// Whether `actor` may comment on a post. Commenting is gated on
/// authentication only; the target post's visibility is not consulted.
pub fn can_comment(actor: Option<&User>, _post: &Post) -> bool {
    actor.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, Utc};

    fn user(id: i32, name: &str) -> User {
        User {
            id,
            username: name.to_owned(),
            display_name: name.to_owned(),
            email: None,
            hashed_password: None,
            creation_date: epoch(),
        }
    }

    fn category(id: i32, published: bool) -> Category {
        Category {
            id,
            title: "Category".to_owned(),
            description: String::new(),
            slug: format!("category-{}", id),
            is_published: published,
            creation_date: epoch(),
        }
    }

    fn post(author: &User, published: bool, pub_date: NaiveDateTime) -> Post {
        Post {
            id: 1,
            title: "A post".to_owned(),
            text: "Some text".to_owned(),
            pub_date,
            author_id: author.id,
            category_id: None,
            location_id: None,
            is_published: published,
            creation_date: epoch(),
        }
    }

    fn epoch() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn published_post_is_visible_to_everyone() {
        let alice = user(1, "alice");
        let bob = user(2, "bob");
        let now = Utc::now().naive_utc();
        let post = post(&alice, true, now - Duration::days(1));
        let cat = category(1, true);

        assert!(is_visible(None, &post, Some(&cat), now));
        assert!(is_visible(Some(&bob), &post, Some(&cat), now));
        assert!(is_visible(Some(&alice), &post, Some(&cat), now));
        assert!(is_visible(None, &post, None, now));
    }

    #[test]
    fn unpublished_post_is_visible_to_author_only() {
        let alice = user(1, "alice");
        let bob = user(2, "bob");
        let now = Utc::now().naive_utc();
        let post = post(&alice, false, now - Duration::days(1));

        assert!(!is_visible(None, &post, None, now));
        assert!(!is_visible(Some(&bob), &post, None, now));
        assert!(is_visible(Some(&alice), &post, None, now));
    }

    #[test]
    fn future_post_is_visible_to_author_only() {
        let alice = user(1, "alice");
        let bob = user(2, "bob");
        let now = Utc::now().naive_utc();
        let post = post(&alice, true, now + Duration::days(1));

        assert!(!is_visible(None, &post, None, now));
        assert!(!is_visible(Some(&bob), &post, None, now));
        assert!(is_visible(Some(&alice), &post, None, now));
    }

    #[test]
    fn hidden_category_hides_the_post() {
        let alice = user(1, "alice");
        let bob = user(2, "bob");
        let now = Utc::now().naive_utc();
        let post = post(&alice, true, now - Duration::days(1));
        let hidden = category(1, false);

        assert!(!is_visible(None, &post, Some(&hidden), now));
        assert!(!is_visible(Some(&bob), &post, Some(&hidden), now));
        assert!(is_visible(Some(&alice), &post, Some(&hidden), now));
    }

    #[test]
    fn only_the_author_can_modify() {
        let alice = user(1, "alice");
        let bob = user(2, "bob");
        let now = Utc::now().naive_utc();
        let post = post(&alice, true, now);

        assert!(can_modify(Some(&alice), &post));
        assert!(!can_modify(Some(&bob), &post));
        assert!(!can_modify(None, &post));

        let comment = Comment {
            id: 1,
            text: "Hi".to_owned(),
            post_id: post.id,
            author_id: bob.id,
            creation_date: epoch(),
        };
        assert!(can_modify(Some(&bob), &comment));
        assert!(!can_modify(Some(&alice), &comment));
        assert!(!can_modify(None, &comment));
    }

    #[test]
    fn commenting_requires_authentication_only() {
        let alice = user(1, "alice");
        let bob = user(2, "bob");
        let now = Utc::now().naive_utc();

        let public = post(&alice, true, now - Duration::days(1));
        assert!(can_comment(Some(&bob), &public));
        assert!(!can_comment(None, &public));

        // Even a post the commenter can't see accepts their comment.
        let draft = post(&alice, false, now);
        assert!(!is_visible(Some(&bob), &draft, None, now));
        assert!(can_comment(Some(&bob), &draft));
    }

    #[test]
    fn owner_filter_only_on_own_profile() {
        let alice = user(1, "alice");
        let bob = user(2, "bob");

        assert_eq!(
            ViewFilter::for_scope(Some(&alice), &Scope::Profile(&alice)),
            ViewFilter::Owner
        );
        assert_eq!(
            ViewFilter::for_scope(Some(&bob), &Scope::Profile(&alice)),
            ViewFilter::Public
        );
        assert_eq!(
            ViewFilter::for_scope(None, &Scope::Profile(&alice)),
            ViewFilter::Public
        );
        assert_eq!(
            ViewFilter::for_scope(Some(&alice), &Scope::Index),
            ViewFilter::Public
        );
        let cat = category(1, true);
        assert_eq!(
            ViewFilter::for_scope(Some(&alice), &Scope::Category(&cat)),
            ViewFilter::Public
        );
    }
}
