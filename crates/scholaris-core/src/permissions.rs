//! The permission rule table and decision functions.
//!
//! All authorization decisions in Scholaris go through [`check_permission`]:
//! one pure, stateless function over the request's [`TenantContext`], the
//! [`Action`] being attempted, and an optional [`ResourceContext`] describing
//! the object being acted on. The rules live in one declarative table
//! ([`role_allows`]) instead of inline conditionals scattered across call
//! sites, so the whole matrix is unit-testable in one place.
//!
//! # Decision order
//!
//! Each step short-circuits on first match:
//!
//! 1. [`Role::Developer`] is allowed unconditionally.
//! 2. A recorded resource school that differs from the caller's school
//!    denies.
//! 3. Owner-scoped actions ([`Action::MarkRead`],
//!    [`Action::ManagePreferences`], and `Read`/`Delete` of a resource that
//!    records an owning user) are decided strictly by owner equality. A
//!    missing owner denies; there is no fall-through to the role table.
//! 4. A mutation whose tenant cannot be verified (caller or resource school
//!    missing) denies.
//! 5. The per-role allow-list decides. Unmatched combinations deny.
//!
//! The default is always deny, never allow.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::AppError;
use crate::tenancy::TenantContext;

/// Closed set of user roles, ordered roughly by privilege.
///
/// `Developer` is the unscoped top-level role (bootstrap/CLI-created only);
/// `User` is the least-privileged default for sessions whose role claim is
/// missing or unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Developer,
    Admin,
    Teacher,
    Accountant,
    Staff,
    Student,
    Guardian,
    User,
}

impl Role {
    /// Parses a role claim string. Returns `None` for unknown values; the
    /// tenant resolver maps that to [`Role::User`].
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "developer" => Some(Role::Developer),
            "admin" => Some(Role::Admin),
            "teacher" => Some(Role::Teacher),
            "accountant" => Some(Role::Accountant),
            "staff" => Some(Role::Staff),
            "student" => Some(Role::Student),
            "guardian" => Some(Role::Guardian),
            "user" => Some(Role::User),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Developer => "developer",
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Accountant => "accountant",
            Role::Staff => "staff",
            Role::Student => "student",
            Role::Guardian => "guardian",
            Role::User => "user",
        }
    }
}

/// Closed set of authorizable actions.
///
/// `SendBatch` is deliberately distinct from `Create`: a role may create a
/// notification kind one at a time without being allowed to fan it out as a
/// batch, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    SendBatch,
    MarkRead,
    ManagePreferences,
    ManageTemplates,
    AssignRole,
}

impl Action {
    /// Actions that write tenant data and therefore require a verified
    /// tenant match.
    fn is_mutation(&self) -> bool {
        matches!(
            self,
            Action::Create
                | Action::Update
                | Action::Delete
                | Action::SendBatch
                | Action::ManageTemplates
                | Action::AssignRole
        )
    }
}

/// Notification categories, used in the per-role create/batch allow-lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Assignment,
    GradePosted,
    ClassSchedule,
    ExamScheduled,
    FeeDue,
    PaymentReceived,
    FeeReminder,
    General,
    EventReminder,
    AttendanceAlert,
}

impl NotificationKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "assignment" => Some(Self::Assignment),
            "grade_posted" => Some(Self::GradePosted),
            "class_schedule" => Some(Self::ClassSchedule),
            "exam_scheduled" => Some(Self::ExamScheduled),
            "fee_due" => Some(Self::FeeDue),
            "payment_received" => Some(Self::PaymentReceived),
            "fee_reminder" => Some(Self::FeeReminder),
            "general" => Some(Self::General),
            "event_reminder" => Some(Self::EventReminder),
            "attendance_alert" => Some(Self::AttendanceAlert),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assignment => "assignment",
            Self::GradePosted => "grade_posted",
            Self::ClassSchedule => "class_schedule",
            Self::ExamScheduled => "exam_scheduled",
            Self::FeeDue => "fee_due",
            Self::PaymentReceived => "payment_received",
            Self::FeeReminder => "fee_reminder",
            Self::General => "general",
            Self::EventReminder => "event_reminder",
            Self::AttendanceAlert => "attendance_alert",
        }
    }
}

/// Category of the resource a permission check is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Event,
    Announcement,
    Result,
    Attendance,
    ExamTemplate,
    Settings,
    Account,
    Notification(NotificationKind),
}

/// Transient descriptor of the object being acted on.
///
/// Built per call by the controllers, never persisted, never mutated by the
/// checker. Only the fields relevant to the check need to be filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceContext {
    pub id: Option<Uuid>,
    /// Owning user, for owner-scoped resources such as notifications.
    pub user_id: Option<Uuid>,
    pub school_id: Option<Uuid>,
    pub kind: Option<ResourceKind>,
    /// Audience role, for role-targeted resources such as announcements.
    pub target_role: Option<Role>,
}

impl ResourceContext {
    pub fn of_kind(kind: ResourceKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn in_school(mut self, school_id: Uuid) -> Self {
        self.school_id = Some(school_id);
        self
    }

    pub fn owned_by(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }
}

// Per-role notification kind allow-lists. Create and batch lists are
// independent: neither implies the other.
const TEACHER_CREATE_KINDS: &[NotificationKind] = &[
    NotificationKind::Assignment,
    NotificationKind::GradePosted,
    NotificationKind::ClassSchedule,
    NotificationKind::ExamScheduled,
];
const TEACHER_BATCH_KINDS: &[NotificationKind] = &[
    NotificationKind::Assignment,
    NotificationKind::ClassSchedule,
];
const ACCOUNTANT_CREATE_KINDS: &[NotificationKind] = &[
    NotificationKind::FeeDue,
    NotificationKind::PaymentReceived,
    NotificationKind::FeeReminder,
];
const ACCOUNTANT_BATCH_KINDS: &[NotificationKind] =
    &[NotificationKind::FeeDue, NotificationKind::FeeReminder];
const STAFF_CREATE_KINDS: &[NotificationKind] = &[
    NotificationKind::General,
    NotificationKind::EventReminder,
];
const STAFF_BATCH_KINDS: &[NotificationKind] = &[NotificationKind::General];

/// Decides whether `ctx` may perform `action` on the described resource.
///
/// Pure and infallible: identical inputs always yield identical results,
/// and a denial is a `false`, never an error.
pub fn check_permission(
    ctx: &TenantContext,
    action: Action,
    resource: Option<&ResourceContext>,
) -> bool {
    // 1. Top-level role bypasses everything, including tenant checks.
    if ctx.role() == Role::Developer {
        return true;
    }

    if let Some(res) = resource {
        // 2. A recorded school that differs from the caller's denies, for
        // every remaining role. Admin of school A cannot touch school B.
        if let (Some(own), Some(other)) = (ctx.school_id(), res.school_id)
            && own != other
        {
            return false;
        }

        // 3. Owner-scoped decisions. Strict: a resource without a recorded
        // owner denies, since ownership cannot be verified.
        if is_owner_scoped(action, res) {
            return res.user_id == Some(ctx.user_id());
        }
    } else if matches!(action, Action::MarkRead | Action::ManagePreferences) {
        // Owner-scoped actions need a resource to verify against.
        return false;
    }

    // 4. Mutations with an unverifiable tenant deny.
    if action.is_mutation() {
        let resource_school = resource.and_then(|r| r.school_id);
        match (ctx.school_id(), resource, resource_school) {
            // No resource descriptor: the caller still needs a school of
            // their own for the service to scope the write.
            (Some(_), None, _) => {}
            (Some(_), Some(_), Some(_)) => {}
            _ => return false,
        }
    }

    // 5. Static role allow-list.
    role_allows(ctx.role(), action, resource.and_then(|r| r.kind))
}

fn is_owner_scoped(action: Action, res: &ResourceContext) -> bool {
    match action {
        Action::MarkRead | Action::ManagePreferences => true,
        Action::Read | Action::Delete => res.user_id.is_some(),
        _ => false,
    }
}

/// The role/action matrix. Consulted only after the wildcard, tenant, and
/// ownership steps have run.
fn role_allows(role: Role, action: Action, kind: Option<ResourceKind>) -> bool {
    match role {
        Role::Developer => true,
        // Admins manage everything inside their own school; the tenant
        // check upstream already pinned the school.
        Role::Admin => true,
        Role::Teacher => match action {
            Action::Read => true,
            Action::Create => match kind {
                Some(ResourceKind::Notification(k)) => TEACHER_CREATE_KINDS.contains(&k),
                Some(
                    ResourceKind::Event
                    | ResourceKind::Announcement
                    | ResourceKind::Result
                    | ResourceKind::Attendance,
                ) => true,
                _ => false,
            },
            Action::Update | Action::Delete => matches!(
                kind,
                Some(
                    ResourceKind::Event
                        | ResourceKind::Announcement
                        | ResourceKind::Result
                        | ResourceKind::Attendance
                )
            ),
            Action::SendBatch => match kind {
                Some(ResourceKind::Notification(k)) => TEACHER_BATCH_KINDS.contains(&k),
                _ => false,
            },
            _ => false,
        },
        Role::Accountant => match action {
            Action::Read => true,
            Action::Create => match kind {
                Some(ResourceKind::Notification(k)) => ACCOUNTANT_CREATE_KINDS.contains(&k),
                _ => false,
            },
            Action::SendBatch => match kind {
                Some(ResourceKind::Notification(k)) => ACCOUNTANT_BATCH_KINDS.contains(&k),
                _ => false,
            },
            _ => false,
        },
        Role::Staff => match action {
            Action::Read => true,
            Action::Create => match kind {
                Some(ResourceKind::Notification(k)) => STAFF_CREATE_KINDS.contains(&k),
                Some(ResourceKind::Event) => true,
                _ => false,
            },
            Action::SendBatch => match kind {
                Some(ResourceKind::Notification(k)) => STAFF_BATCH_KINDS.contains(&k),
                _ => false,
            },
            _ => false,
        },
        // Reads are further narrowed by the tenant filter in every query;
        // anything owner-scoped was already decided upstream.
        Role::Student | Role::Guardian | Role::User => matches!(action, Action::Read),
    }
}

/// Fails the current operation with a `403` when [`check_permission`]
/// denies. The error names the role, action, and resource id (when known)
/// for the audit log; it never includes another tenant's data.
pub fn assert_permission(
    ctx: &TenantContext,
    action: Action,
    resource: Option<&ResourceContext>,
) -> Result<(), AppError> {
    if check_permission(ctx, action, resource) {
        return Ok(());
    }

    let resource_id = resource
        .and_then(|r| r.id)
        .map(|id| format!(" on resource {id}"))
        .unwrap_or_default();

    tracing::debug!(
        role = ctx.role().as_str(),
        action = ?action,
        resource = ?resource,
        "permission denied"
    );

    Err(AppError::forbidden(format!(
        "Role {} is not permitted to perform {:?}{}",
        ctx.role().as_str(),
        action,
        resource_id
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(role: Role, school_id: Option<Uuid>) -> TenantContext {
        TenantContext::new(Uuid::new_v4(), school_id, role, "en")
    }

    #[test]
    fn test_developer_wildcard() {
        let dev = ctx(Role::Developer, None);
        let other_school = ResourceContext::of_kind(ResourceKind::Settings)
            .in_school(Uuid::new_v4());

        for action in [
            Action::Read,
            Action::Create,
            Action::Update,
            Action::Delete,
            Action::SendBatch,
            Action::ManageTemplates,
            Action::AssignRole,
        ] {
            assert!(check_permission(&dev, action, Some(&other_school)));
            assert!(check_permission(&dev, action, None));
        }
    }

    #[test]
    fn test_cross_tenant_denied_for_every_other_role() {
        let school = Uuid::new_v4();
        let foreign = ResourceContext::of_kind(ResourceKind::Event)
            .in_school(Uuid::new_v4());

        for role in [
            Role::Admin,
            Role::Teacher,
            Role::Accountant,
            Role::Staff,
            Role::Student,
            Role::Guardian,
            Role::User,
        ] {
            let c = ctx(role, Some(school));
            assert!(
                !check_permission(&c, Action::Update, Some(&foreign)),
                "{role:?} crossed the tenant boundary"
            );
        }
    }

    #[test]
    fn test_admin_cross_tenant_update_denied() {
        // Admin of S1 updating a resource in S2: blocked.
        let admin = ctx(Role::Admin, Some(Uuid::new_v4()));
        let resource = ResourceContext::of_kind(ResourceKind::Announcement)
            .in_school(Uuid::new_v4());
        assert!(!check_permission(&admin, Action::Update, Some(&resource)));
    }

    #[test]
    fn test_teacher_cannot_create_fee_notification() {
        let school = Uuid::new_v4();
        let teacher = ctx(Role::Teacher, Some(school));
        let resource =
            ResourceContext::of_kind(ResourceKind::Notification(NotificationKind::FeeDue))
                .in_school(school);
        assert!(!check_permission(&teacher, Action::Create, Some(&resource)));
    }

    #[test]
    fn test_teacher_can_create_grade_notification() {
        let school = Uuid::new_v4();
        let teacher = ctx(Role::Teacher, Some(school));
        let resource =
            ResourceContext::of_kind(ResourceKind::Notification(NotificationKind::GradePosted))
                .in_school(school);
        assert!(check_permission(&teacher, Action::Create, Some(&resource)));
    }

    #[test]
    fn test_create_and_batch_lists_are_independent() {
        let school = Uuid::new_v4();
        let teacher = ctx(Role::Teacher, Some(school));
        // Teachers may create grade notifications one at a time but not
        // fan them out as a batch.
        let grade =
            ResourceContext::of_kind(ResourceKind::Notification(NotificationKind::GradePosted))
                .in_school(school);
        assert!(check_permission(&teacher, Action::Create, Some(&grade)));
        assert!(!check_permission(&teacher, Action::SendBatch, Some(&grade)));

        let accountant = ctx(Role::Accountant, Some(school));
        let payment = ResourceContext::of_kind(ResourceKind::Notification(
            NotificationKind::PaymentReceived,
        ))
        .in_school(school);
        assert!(check_permission(&accountant, Action::Create, Some(&payment)));
        assert!(!check_permission(&accountant, Action::SendBatch, Some(&payment)));
    }

    #[test]
    fn test_owner_scoped_delete() {
        let student = ctx(Role::Student, Some(Uuid::new_v4()));
        let own = ResourceContext::default().owned_by(student.user_id());
        let someone_elses = ResourceContext::default().owned_by(Uuid::new_v4());

        assert!(check_permission(&student, Action::Delete, Some(&own)));
        assert!(!check_permission(&student, Action::Delete, Some(&someone_elses)));
    }

    #[test]
    fn test_owner_scoped_denies_without_recorded_owner() {
        // Ownership cannot be verified: deny, no fall-through.
        let student = ctx(Role::Student, Some(Uuid::new_v4()));
        let ownerless = ResourceContext::default();
        assert!(!check_permission(&student, Action::MarkRead, Some(&ownerless)));
        assert!(!check_permission(&student, Action::ManagePreferences, Some(&ownerless)));
        assert!(!check_permission(&student, Action::MarkRead, None));
    }

    #[test]
    fn test_owner_match_still_respects_tenant_mismatch() {
        let school = Uuid::new_v4();
        let student = ctx(Role::Student, Some(school));
        let own_but_foreign = ResourceContext::default()
            .owned_by(student.user_id())
            .in_school(Uuid::new_v4());
        assert!(!check_permission(&student, Action::Delete, Some(&own_but_foreign)));
    }

    #[test]
    fn test_mutation_with_unverifiable_tenant_denied() {
        let school = Uuid::new_v4();
        let admin = ctx(Role::Admin, Some(school));

        // Resource school unrecorded on update/delete: deny even though the
        // role would otherwise be permitted.
        let no_school = ResourceContext::of_kind(ResourceKind::Event);
        assert!(!check_permission(&admin, Action::Update, Some(&no_school)));
        assert!(!check_permission(&admin, Action::Delete, Some(&no_school)));

        // Caller without a school: all mutations deny.
        let unscoped = ctx(Role::Admin, None);
        let resource = ResourceContext::of_kind(ResourceKind::Event).in_school(school);
        assert!(!check_permission(&unscoped, Action::Create, Some(&resource)));
        assert!(!check_permission(&unscoped, Action::Create, None));
    }

    #[test]
    fn test_reads_allowed_without_resource() {
        for role in [Role::Admin, Role::Teacher, Role::Student, Role::Guardian] {
            let c = ctx(role, Some(Uuid::new_v4()));
            assert!(check_permission(&c, Action::Read, None));
        }
    }

    #[test]
    fn test_assign_role_and_templates_admin_only() {
        let school = Uuid::new_v4();
        let resource = ResourceContext::of_kind(ResourceKind::Account)
            .in_school(school)
            .with_id(Uuid::new_v4());
        let template = ResourceContext::of_kind(ResourceKind::ExamTemplate).in_school(school);

        assert!(check_permission(&ctx(Role::Admin, Some(school)), Action::AssignRole, Some(&resource)));
        assert!(check_permission(&ctx(Role::Admin, Some(school)), Action::ManageTemplates, Some(&template)));

        for role in [Role::Teacher, Role::Accountant, Role::Staff, Role::Student] {
            let c = ctx(role, Some(school));
            assert!(!check_permission(&c, Action::AssignRole, Some(&resource)));
            assert!(!check_permission(&c, Action::ManageTemplates, Some(&template)));
        }
    }

    #[test]
    fn test_check_permission_is_idempotent() {
        let school = Uuid::new_v4();
        let teacher = ctx(Role::Teacher, Some(school));
        let resource =
            ResourceContext::of_kind(ResourceKind::Notification(NotificationKind::Assignment))
                .in_school(school);

        let first = check_permission(&teacher, Action::SendBatch, Some(&resource));
        let second = check_permission(&teacher, Action::SendBatch, Some(&resource));
        assert_eq!(first, second);
        assert!(first);
    }

    #[test]
    fn test_assert_permission_error_carries_context() {
        let school = Uuid::new_v4();
        let teacher = ctx(Role::Teacher, Some(school));
        let id = Uuid::new_v4();
        let resource =
            ResourceContext::of_kind(ResourceKind::Notification(NotificationKind::FeeDue))
                .in_school(school)
                .with_id(id);

        let err = assert_permission(&teacher, Action::Create, Some(&resource)).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::FORBIDDEN);
        let msg = err.error.to_string();
        assert!(msg.contains("teacher"));
        assert!(msg.contains(&id.to_string()));
    }

    #[test]
    fn test_role_round_trip() {
        for role in [
            Role::Developer,
            Role::Admin,
            Role::Teacher,
            Role::Accountant,
            Role::Staff,
            Role::Student,
            Role::Guardian,
            Role::User,
        ] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("superuser"), None);
    }

    #[test]
    fn test_notification_kind_round_trip() {
        assert_eq!(
            NotificationKind::parse("fee_due"),
            Some(NotificationKind::FeeDue)
        );
        assert_eq!(NotificationKind::FeeDue.as_str(), "fee_due");
        assert_eq!(NotificationKind::parse("newsletter"), None);
    }
}
