use scholaris::scholaris_core::{
    Action, NotificationKind, ResourceContext, ResourceKind, Role, TenantContext, check_permission,
};
use uuid::Uuid;

fn ctx(role: Role, school_id: Option<Uuid>) -> TenantContext {
    TenantContext::new(Uuid::new_v4(), school_id, role, "en")
}

#[test]
fn test_developer_bypasses_everything() {
    let dev = ctx(Role::Developer, None);
    let other_school = Uuid::new_v4();
    let resource = ResourceContext::of_kind(ResourceKind::Event).in_school(other_school);

    assert!(check_permission(&dev, Action::Delete, Some(&resource)));
    assert!(check_permission(&dev, Action::AssignRole, Some(&resource)));
    assert!(check_permission(&dev, Action::SendBatch, None));
}

#[test]
fn test_admin_denied_across_schools() {
    let school_a = Uuid::new_v4();
    let school_b = Uuid::new_v4();
    let admin = ctx(Role::Admin, Some(school_a));
    let resource = ResourceContext::of_kind(ResourceKind::Event).in_school(school_b);

    assert!(!check_permission(&admin, Action::Update, Some(&resource)));
    assert!(!check_permission(&admin, Action::Read, Some(&resource)));
}

#[test]
fn test_admin_allowed_in_own_school() {
    let school = Uuid::new_v4();
    let admin = ctx(Role::Admin, Some(school));

    for action in [
        Action::Read,
        Action::Create,
        Action::Update,
        Action::Delete,
        Action::AssignRole,
        Action::ManageTemplates,
    ] {
        let resource = ResourceContext::of_kind(ResourceKind::Event).in_school(school);
        assert!(check_permission(&admin, action, Some(&resource)), "{action:?}");
    }
}

#[test]
fn test_student_reads_but_never_mutates() {
    let school = Uuid::new_v4();
    let student = ctx(Role::Student, Some(school));
    let resource = ResourceContext::of_kind(ResourceKind::Event).in_school(school);

    assert!(check_permission(&student, Action::Read, Some(&resource)));
    assert!(!check_permission(&student, Action::Create, Some(&resource)));
    assert!(!check_permission(&student, Action::Update, Some(&resource)));
    assert!(!check_permission(&student, Action::Delete, Some(&resource)));
}

#[test]
fn test_owner_can_mark_own_notification_read() {
    let school = Uuid::new_v4();
    let user_id = Uuid::new_v4();
    let student = TenantContext::new(user_id, Some(school), Role::Student, "en");

    let own = ResourceContext::of_kind(ResourceKind::Notification(NotificationKind::General))
        .in_school(school)
        .owned_by(user_id);
    assert!(check_permission(&student, Action::MarkRead, Some(&own)));

    let someone_elses =
        ResourceContext::of_kind(ResourceKind::Notification(NotificationKind::General))
            .in_school(school)
            .owned_by(Uuid::new_v4());
    assert!(!check_permission(&student, Action::MarkRead, Some(&someone_elses)));
}

#[test]
fn test_owner_scoped_delete_without_recorded_owner_falls_to_matrix() {
    let school = Uuid::new_v4();
    let student = ctx(Role::Student, Some(school));

    // Owner not recorded: the read goes through the role matrix, which
    // denies student deletes.
    let resource = ResourceContext::of_kind(ResourceKind::Notification(NotificationKind::General))
        .in_school(school);
    assert!(!check_permission(&student, Action::Delete, Some(&resource)));
}

#[test]
fn test_teacher_create_kinds_gated() {
    let school = Uuid::new_v4();
    let teacher = ctx(Role::Teacher, Some(school));

    let allowed = [
        NotificationKind::Assignment,
        NotificationKind::GradePosted,
        NotificationKind::ClassSchedule,
        NotificationKind::ExamScheduled,
    ];
    for kind in allowed {
        let resource =
            ResourceContext::of_kind(ResourceKind::Notification(kind)).in_school(school);
        assert!(check_permission(&teacher, Action::Create, Some(&resource)), "{kind:?}");
    }

    let denied = [
        NotificationKind::FeeDue,
        NotificationKind::PaymentReceived,
        NotificationKind::General,
    ];
    for kind in denied {
        let resource =
            ResourceContext::of_kind(ResourceKind::Notification(kind)).in_school(school);
        assert!(!check_permission(&teacher, Action::Create, Some(&resource)), "{kind:?}");
    }
}

#[test]
fn test_create_does_not_imply_batch() {
    let school = Uuid::new_v4();
    let teacher = ctx(Role::Teacher, Some(school));

    // GradePosted is creatable one at a time but not batchable.
    let resource =
        ResourceContext::of_kind(ResourceKind::Notification(NotificationKind::GradePosted))
            .in_school(school);
    assert!(check_permission(&teacher, Action::Create, Some(&resource)));
    assert!(!check_permission(&teacher, Action::SendBatch, Some(&resource)));

    // Assignment is both.
    let resource =
        ResourceContext::of_kind(ResourceKind::Notification(NotificationKind::Assignment))
            .in_school(school);
    assert!(check_permission(&teacher, Action::SendBatch, Some(&resource)));
}

#[test]
fn test_accountant_kinds() {
    let school = Uuid::new_v4();
    let accountant = ctx(Role::Accountant, Some(school));

    let fee_due = ResourceContext::of_kind(ResourceKind::Notification(NotificationKind::FeeDue))
        .in_school(school);
    assert!(check_permission(&accountant, Action::Create, Some(&fee_due)));
    assert!(check_permission(&accountant, Action::SendBatch, Some(&fee_due)));

    let payment =
        ResourceContext::of_kind(ResourceKind::Notification(NotificationKind::PaymentReceived))
            .in_school(school);
    assert!(check_permission(&accountant, Action::Create, Some(&payment)));
    assert!(!check_permission(&accountant, Action::SendBatch, Some(&payment)));

    let assignment =
        ResourceContext::of_kind(ResourceKind::Notification(NotificationKind::Assignment))
            .in_school(school);
    assert!(!check_permission(&accountant, Action::Create, Some(&assignment)));
}

#[test]
fn test_mutation_with_unverifiable_tenant_denied() {
    let teacher_no_school = ctx(Role::Teacher, None);
    let resource = ResourceContext::of_kind(ResourceKind::Event);

    assert!(!check_permission(&teacher_no_school, Action::Create, Some(&resource)));
    assert!(!check_permission(&teacher_no_school, Action::Update, Some(&resource)));
}

#[test]
fn test_default_role_denied_mutations() {
    let school = Uuid::new_v4();
    let user = ctx(Role::User, Some(school));
    let resource = ResourceContext::of_kind(ResourceKind::Event).in_school(school);

    assert!(check_permission(&user, Action::Read, Some(&resource)));
    assert!(!check_permission(&user, Action::Create, Some(&resource)));
    assert!(!check_permission(&user, Action::AssignRole, Some(&resource)));
}

#[test]
fn test_manage_preferences_is_owner_only() {
    let school = Uuid::new_v4();
    let user_id = Uuid::new_v4();
    let guardian = TenantContext::new(user_id, Some(school), Role::Guardian, "en");

    let own = ResourceContext {
        user_id: Some(user_id),
        ..ResourceContext::default()
    };
    assert!(check_permission(&guardian, Action::ManagePreferences, Some(&own)));

    let other = ResourceContext {
        user_id: Some(Uuid::new_v4()),
        ..ResourceContext::default()
    };
    assert!(!check_permission(&guardian, Action::ManagePreferences, Some(&other)));
}

#[test]
fn test_determinism() {
    let school = Uuid::new_v4();
    let teacher = ctx(Role::Teacher, Some(school));
    let resource = ResourceContext::of_kind(ResourceKind::Result).in_school(school);

    let first = check_permission(&teacher, Action::Create, Some(&resource));
    for _ in 0..10 {
        assert_eq!(check_permission(&teacher, Action::Create, Some(&resource)), first);
    }
}
