//! Roles and the explicit tables that hang off them.
//!
//! Every role-dependent choice (which section is shown, which list region is
//! filled, which endpoint feeds it, whether posts can be deleted) is a `match`
//! over [`Role`] so a new role cannot silently fall through.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Parent,
    SchoolAdmin,
    Teacher,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Student, Role::Parent, Role::SchoolAdmin, Role::Teacher];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Parent => "parent",
            Role::SchoolAdmin => "school_admin",
            Role::Teacher => "teacher",
        }
    }

    /// Human label for the welcome banner: the wire name with underscores as spaces.
    pub fn label(self) -> String {
        self.as_str().replace('_', " ")
    }

    pub fn section(self) -> SectionId {
        match self {
            Role::Student => SectionId::StudentDashboard,
            Role::Parent => SectionId::ParentDashboard,
            Role::SchoolAdmin => SectionId::AdminDashboard,
            Role::Teacher => SectionId::TeacherDashboard,
        }
    }

    /// The post feed listed on this role's dashboard. Teachers only publish.
    pub fn feed(self) -> Option<PostFeed> {
        match self {
            Role::Student => Some(PostFeed::Student),
            Role::Parent => Some(PostFeed::Parent),
            Role::SchoolAdmin => Some(PostFeed::Admin),
            Role::Teacher => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| DomainError::unknown_role(value))
    }
}

/// Top-level page sections; exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Login,
    StudentDashboard,
    ParentDashboard,
    AdminDashboard,
    TeacherDashboard,
}

impl SectionId {
    pub const ALL: [SectionId; 5] = [
        SectionId::Login,
        SectionId::StudentDashboard,
        SectionId::ParentDashboard,
        SectionId::AdminDashboard,
        SectionId::TeacherDashboard,
    ];

    pub fn element_id(self) -> &'static str {
        match self {
            SectionId::Login => "login-section",
            SectionId::StudentDashboard => "student-dashboard-section",
            SectionId::ParentDashboard => "parent-dashboard-section",
            SectionId::AdminDashboard => "admin-dashboard-section",
            SectionId::TeacherDashboard => "teacher-dashboard-section",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SectionId::Login => "Sign in",
            SectionId::StudentDashboard => "Student dashboard",
            SectionId::ParentDashboard => "Parent dashboard",
            SectionId::AdminDashboard => "School admin dashboard",
            SectionId::TeacherDashboard => "Teacher dashboard",
        }
    }

    /// The post list region inside this section, if it has one.
    pub fn list(self) -> Option<ListId> {
        match self {
            SectionId::StudentDashboard => Some(ListId::StudentPosts),
            SectionId::ParentDashboard => Some(ListId::ParentPosts),
            SectionId::AdminDashboard => Some(ListId::AdminPosts),
            SectionId::Login | SectionId::TeacherDashboard => None,
        }
    }
}

/// Read endpoints for posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostFeed {
    Student,
    Parent,
    Admin,
}

impl PostFeed {
    pub fn path(self) -> &'static str {
        match self {
            PostFeed::Student => "api/student/posts",
            PostFeed::Parent => "api/parent/posts",
            PostFeed::Admin => "api/admin/posts",
        }
    }

    pub fn list(self) -> ListId {
        match self {
            PostFeed::Student => ListId::StudentPosts,
            PostFeed::Parent => ListId::ParentPosts,
            PostFeed::Admin => ListId::AdminPosts,
        }
    }

    /// Only the admin feed offers a delete control on each card.
    pub fn allows_delete(self) -> bool {
        matches!(self, PostFeed::Admin)
    }
}

/// Post list regions inside the dashboard sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListId {
    StudentPosts,
    ParentPosts,
    AdminPosts,
}

impl ListId {
    pub fn element_id(self) -> &'static str {
        match self {
            ListId::StudentPosts => "posts-list",
            ListId::ParentPosts => "parent-posts-list",
            ListId::AdminPosts => "admin-posts-list",
        }
    }
}
