// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Content Data Models
//!
//! This module defines the stored records and creation payloads of every
//! content kind. All types derive `Serialize`, `Deserialize`, and `ToSchema`
//! for automatic JSON handling and OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Orderable collections**: projects, services, timeline items, blog posts
//! - **Append-only log**: contact messages (only the read flag changes)
//! - **Singletons**: the about/profile record and the site settings
//!
//! Fields added after a kind was first stored (such as `order`) carry a serde
//! default, so older records keep deserializing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::settable_fields;
use crate::storage::database::{ABOUT, BLOG_POSTS, MESSAGES, PROJECTS, SERVICES, SETTINGS, TIMELINE_ITEMS};
use crate::storage::entity::{Entity, Orderable, SingletonEntity, SINGLETON_ID};

fn default_true() -> bool {
    true
}

fn default_service_status() -> String {
    "published".to_string()
}

macro_rules! impl_orderable {
    ($($entity:ty),+ $(,)?) => {
        $(
            impl Orderable for $entity {
                fn order(&self) -> i64 {
                    self.order
                }

                fn set_order(&mut self, order: i64) {
                    self.order = order;
                }
            }
        )+
    };
}

// =============================================================================
// Projects
// =============================================================================

/// A portfolio project.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Project {
    pub id: u64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    /// Technology tags shown on the project card.
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_published: bool,
    /// Display position within the project list.
    #[serde(default)]
    pub order: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request to create a project.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectCreate {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub order: i64,
}

impl Entity for Project {
    type Create = ProjectCreate;
    const KIND: &'static str = "Project";
    const TABLE: &'static str = PROJECTS;
    const SETTABLE_FIELDS: &'static [&'static str] = settable_fields!(Project {
        title,
        description,
        image_url,
        github_url,
        live_url,
        technologies,
        is_featured,
        is_published,
        order,
    });

    fn id(&self) -> u64 {
        self.id
    }

    fn from_create(id: u64, payload: ProjectCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: payload.title,
            description: payload.description,
            image_url: payload.image_url,
            github_url: payload.github_url,
            live_url: payload.live_url,
            technologies: payload.technologies,
            is_featured: payload.is_featured,
            is_published: payload.is_published,
            order: payload.order,
            created_at: now,
            updated_at: None,
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}

// =============================================================================
// Services
// =============================================================================

/// A service offered, shown as a card with an icon.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Service {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub icon_color: Option<String>,
    /// Free-form publication status (e.g. `published`, `draft`).
    #[serde(default = "default_service_status")]
    pub status: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub order: i64,
}

/// Request to create a service.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceCreate {
    pub title: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub icon_color: Option<String>,
    #[serde(default = "default_service_status")]
    pub status: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub order: i64,
}

impl Entity for Service {
    type Create = ServiceCreate;
    const KIND: &'static str = "Service";
    const TABLE: &'static str = SERVICES;
    const SETTABLE_FIELDS: &'static [&'static str] =
        settable_fields!(Service { title, description, icon, icon_color, status, tags, order });

    fn id(&self) -> u64 {
        self.id
    }

    fn from_create(id: u64, payload: ServiceCreate, _now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: payload.title,
            description: payload.description,
            icon: payload.icon,
            icon_color: payload.icon_color,
            status: payload.status,
            tags: payload.tags,
            order: payload.order,
        }
    }
}

// =============================================================================
// Timeline
// =============================================================================

/// An entry of the career/education timeline.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TimelineItem {
    pub id: u64,
    /// Period label, e.g. `2021 - 2023`.
    pub year: String,
    pub title: String,
    pub description: String,
    /// Icon name (`work`, `school`, `laptop_mac`, `star`, ...).
    pub icon: String,
    #[serde(default)]
    pub order: i64,
}

/// Request to create a timeline entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimelineCreate {
    pub year: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub order: i64,
}

impl Entity for TimelineItem {
    type Create = TimelineCreate;
    const KIND: &'static str = "Timeline item";
    const TABLE: &'static str = TIMELINE_ITEMS;
    const SETTABLE_FIELDS: &'static [&'static str] =
        settable_fields!(TimelineItem { year, title, description, icon, order });

    fn id(&self) -> u64 {
        self.id
    }

    fn from_create(id: u64, payload: TimelineCreate, _now: DateTime<Utc>) -> Self {
        Self {
            id,
            year: payload.year,
            title: payload.title,
            description: payload.description,
            icon: payload.icon,
            order: payload.order,
        }
    }
}

// =============================================================================
// Messages
// =============================================================================

/// A contact-form message. Append-only apart from the read flag.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Message {
    pub id: u64,
    pub sender_name: String,
    pub sender_email: String,
    pub subject: String,
    pub content: String,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Request submitted by the public contact form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageCreate {
    pub sender_name: String,
    pub sender_email: String,
    pub subject: String,
    pub content: String,
}

impl Entity for Message {
    type Create = MessageCreate;
    const KIND: &'static str = "Message";
    const TABLE: &'static str = MESSAGES;
    const SETTABLE_FIELDS: &'static [&'static str] = settable_fields!(Message { is_read });

    fn id(&self) -> u64 {
        self.id
    }

    fn from_create(id: u64, payload: MessageCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            sender_name: payload.sender_name,
            sender_email: payload.sender_email,
            subject: payload.subject,
            content: payload.content,
            is_read: false,
            created_at: now,
        }
    }
}

/// Sort messages newest first, ties broken by descending id.
pub fn newest_first(messages: &mut [Message]) {
    messages.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

// =============================================================================
// Blog
// =============================================================================

/// A blog post, either hosted here or linking to an external article.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BlogPost {
    pub id: u64,
    pub title: String,
    /// URL slug, unique among blog posts.
    pub slug: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub order: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request to create a blog post.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BlogPostCreate {
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub order: i64,
}

impl Entity for BlogPost {
    type Create = BlogPostCreate;
    const KIND: &'static str = "Blog post";
    const TABLE: &'static str = BLOG_POSTS;
    const SETTABLE_FIELDS: &'static [&'static str] = settable_fields!(BlogPost {
        title,
        slug,
        content,
        image_url,
        external_url,
        tags,
        is_published,
        order,
    });

    fn id(&self) -> u64 {
        self.id
    }

    fn from_create(id: u64, payload: BlogPostCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: payload.title,
            slug: payload.slug,
            content: payload.content,
            image_url: payload.image_url,
            external_url: payload.external_url,
            tags: payload.tags,
            is_published: payload.is_published,
            order: payload.order,
            created_at: now,
            updated_at: None,
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }

    fn unique_key(&self) -> Option<(&'static str, &str)> {
        Some(("slug", &self.slug))
    }
}

impl_orderable!(Project, Service, TimelineItem, BlogPost);

// =============================================================================
// About (profile singleton)
// =============================================================================

/// The site owner's profile.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
#[serde(default)]
pub struct About {
    pub id: u64,
    pub full_name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub cv_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    /// Skills with proficiency, as free-form objects.
    #[schema(value_type = Vec<Object>)]
    pub skills: Vec<Value>,
    #[schema(value_type = Vec<Object>)]
    pub experience: Vec<Value>,
    #[schema(value_type = Vec<Object>)]
    pub education: Vec<Value>,
    /// Network name → profile URL.
    #[schema(value_type = Object)]
    pub social_links: serde_json::Map<String, Value>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for About {
    type Create = About;
    const KIND: &'static str = "About";
    const TABLE: &'static str = ABOUT;
    const SETTABLE_FIELDS: &'static [&'static str] = settable_fields!(About {
        full_name,
        title,
        bio,
        profile_image,
        cv_url,
        email,
        phone,
        location,
        skills,
        experience,
        education,
        social_links,
    });

    fn id(&self) -> u64 {
        self.id
    }

    fn from_create(id: u64, payload: About, now: DateTime<Utc>) -> Self {
        Self {
            id,
            updated_at: Some(now),
            ..payload
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}

impl SingletonEntity for About {
    fn placeholder() -> Self {
        Self {
            id: SINGLETON_ID,
            full_name: Some("Your Name".to_string()),
            title: Some("Full Stack Developer".to_string()),
            bio: Some("No bio yet.".to_string()),
            ..Self::default()
        }
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

// =============================================================================
// Site settings (singleton)
// =============================================================================

/// Site-wide metadata, analytics and theme colors.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(default)]
pub struct SiteSettings {
    pub id: u64,
    pub site_title: Option<String>,
    pub site_description: Option<String>,
    pub site_keywords: Option<String>,
    pub site_author: Option<String>,
    pub site_url: Option<String>,
    pub analytics_id: Option<String>,
    pub contact_email: Option<String>,
    pub social_github: Option<String>,
    pub social_linkedin: Option<String>,
    pub social_twitter: Option<String>,
    pub social_instagram: Option<String>,
    pub theme_primary_color: Option<String>,
    pub theme_secondary_color: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            id: SINGLETON_ID,
            site_title: Some("Portfolio".to_string()),
            site_description: None,
            site_keywords: None,
            site_author: None,
            site_url: None,
            analytics_id: None,
            contact_email: None,
            social_github: None,
            social_linkedin: None,
            social_twitter: None,
            social_instagram: None,
            theme_primary_color: Some("#6366f1".to_string()),
            theme_secondary_color: Some("#8b5cf6".to_string()),
            updated_at: None,
        }
    }
}

impl Entity for SiteSettings {
    type Create = SiteSettings;
    const KIND: &'static str = "Settings";
    const TABLE: &'static str = SETTINGS;
    const SETTABLE_FIELDS: &'static [&'static str] = settable_fields!(SiteSettings {
        site_title,
        site_description,
        site_keywords,
        site_author,
        site_url,
        analytics_id,
        contact_email,
        social_github,
        social_linkedin,
        social_twitter,
        social_instagram,
        theme_primary_color,
        theme_secondary_color,
    });

    fn id(&self) -> u64 {
        self.id
    }

    fn from_create(id: u64, payload: SiteSettings, now: DateTime<Utc>) -> Self {
        Self {
            id,
            updated_at: Some(now),
            ..payload
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}

impl SingletonEntity for SiteSettings {
    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Window over a list endpoint.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Number of records to skip.
    #[serde(default)]
    pub offset: usize,
    /// Maximum number of records returned.
    #[serde(default = "default_page_limit")]
    pub limit: usize,
}

pub const DEFAULT_PAGE_LIMIT: usize = 100;

fn default_page_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Result of a project image upload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ImageUploadResponse {
    pub image_url: String,
    pub storage_path: String,
}

/// Result of a general file upload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct FileUploadResponse {
    pub url: String,
    pub storage_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DeleteAssetResponse {
    pub deleted: bool,
}

/// Where an uploaded asset was stored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StoredAsset {
    /// URL the asset can be fetched from.
    pub public_url: String,
    /// Backend-relative path, needed to delete the asset later.
    pub storage_path: String,
}

/// Record counts shown on the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ContentStats {
    pub projects: u64,
    pub services: u64,
    pub timeline_items: u64,
    pub blog_posts: u64,
    pub messages: u64,
    pub unread_messages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitelists_exclude_server_managed_fields() {
        for fields in [
            Project::SETTABLE_FIELDS,
            Service::SETTABLE_FIELDS,
            TimelineItem::SETTABLE_FIELDS,
            Message::SETTABLE_FIELDS,
            BlogPost::SETTABLE_FIELDS,
            About::SETTABLE_FIELDS,
            SiteSettings::SETTABLE_FIELDS,
        ] {
            assert!(!fields.contains(&"id"));
            assert!(!fields.contains(&"created_at"));
            assert!(!fields.contains(&"updated_at"));
        }
        assert_eq!(Message::SETTABLE_FIELDS, &["is_read"]);
    }

    #[test]
    fn records_without_order_read_as_zero() {
        let stored = r#"{
            "id": 3, "title": "Old", "slug": "old", "content": "...",
            "created_at": "2024-05-01T10:00:00Z"
        }"#;
        let post: BlogPost = serde_json::from_str(stored).unwrap();
        assert_eq!(post.order, 0);
        assert!(!post.is_published);
        assert!(post.tags.is_empty());
    }

    #[test]
    fn creation_defaults_follow_schema() {
        let project: ProjectCreate =
            serde_json::from_str(r#"{"title": "T", "description": "D"}"#).unwrap();
        assert!(project.is_published);
        assert!(!project.is_featured);

        let service: ServiceCreate =
            serde_json::from_str(r#"{"title": "T", "description": "D", "icon": "code"}"#).unwrap();
        assert_eq!(service.status, "published");
    }

    #[test]
    fn singleton_defaults() {
        let settings = SiteSettings::default();
        assert_eq!(settings.site_title.as_deref(), Some("Portfolio"));
        assert_eq!(settings.theme_primary_color.as_deref(), Some("#6366f1"));

        let about = About::placeholder();
        assert_eq!(about.id, SINGLETON_ID);
        assert_eq!(about.title.as_deref(), Some("Full Stack Developer"));
        assert!(about.skills.is_empty());
    }

    #[test]
    fn newest_first_orders_by_creation_time() {
        let older = Message::from_create(
            1,
            MessageCreate {
                sender_name: "A".into(),
                sender_email: "a@x.dev".into(),
                subject: "s".into(),
                content: "c".into(),
            },
            "2024-01-01T00:00:00Z".parse().unwrap(),
        );
        let newer = Message {
            id: 2,
            created_at: "2024-02-01T00:00:00Z".parse().unwrap(),
            ..older.clone()
        };

        let mut messages = vec![older.clone(), newer.clone()];
        newest_first(&mut messages);
        assert_eq!(messages, vec![newer, older]);
    }
}
