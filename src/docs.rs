use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use scholaris_core::{NotificationKind, PaginationMeta, Role};

use crate::modules::accounts::model::{Account, AssignRoleDto, PaginatedAccountsResponse};
use crate::modules::announcements::model::{
    Announcement, CreateAnnouncementDto, PaginatedAnnouncementsResponse, UpdateAnnouncementDto,
};
use crate::modules::attendance::model::{
    AttendanceRecord, PaginatedAttendanceResponse, RecordAttendanceDto, UpdateAttendanceDto,
};
use crate::modules::auth::model::{LoginRequest, LoginResponse};
use crate::modules::events::model::{
    CreateEventDto, Event, PaginatedEventsResponse, UpdateEventDto,
};
use crate::modules::exams::model::{
    CreateExamTemplateDto, ExamTemplate, PaginatedExamTemplatesResponse, UpdateExamTemplateDto,
};
use crate::modules::notifications::model::{
    BatchSendResponse, CreateNotificationDto, Notification, NotificationPreference,
    PaginatedNotificationsResponse, SendBatchDto, SetPreferenceDto,
};
use crate::modules::results::model::{
    CreateResultDto, PaginatedResultsResponse, ResultRecord, UpdateResultDto,
};
use crate::modules::settings::model::{SchoolSettings, UpsertSettingsDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::accounts::controller::get_accounts,
        crate::modules::accounts::controller::get_account_by_id,
        crate::modules::accounts::controller::assign_role,
        crate::modules::events::controller::create_event,
        crate::modules::events::controller::get_events,
        crate::modules::events::controller::get_event_by_id,
        crate::modules::events::controller::update_event,
        crate::modules::events::controller::delete_event,
        crate::modules::announcements::controller::create_announcement,
        crate::modules::announcements::controller::get_announcements,
        crate::modules::announcements::controller::update_announcement,
        crate::modules::announcements::controller::delete_announcement,
        crate::modules::results::controller::create_result,
        crate::modules::results::controller::get_results,
        crate::modules::results::controller::update_result,
        crate::modules::results::controller::delete_result,
        crate::modules::attendance::controller::record_attendance,
        crate::modules::attendance::controller::get_attendance,
        crate::modules::attendance::controller::update_attendance,
        crate::modules::exams::controller::create_exam_template,
        crate::modules::exams::controller::get_exam_templates,
        crate::modules::exams::controller::get_exam_template_by_id,
        crate::modules::exams::controller::update_exam_template,
        crate::modules::exams::controller::delete_exam_template,
        crate::modules::notifications::controller::get_notifications,
        crate::modules::notifications::controller::create_notification,
        crate::modules::notifications::controller::send_batch,
        crate::modules::notifications::controller::mark_read,
        crate::modules::notifications::controller::get_preferences,
        crate::modules::notifications::controller::set_preference,
        crate::modules::settings::controller::get_settings,
        crate::modules::settings::controller::upsert_settings,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            Role,
            NotificationKind,
            Account,
            AssignRoleDto,
            PaginatedAccountsResponse,
            Event,
            CreateEventDto,
            UpdateEventDto,
            PaginatedEventsResponse,
            Announcement,
            CreateAnnouncementDto,
            UpdateAnnouncementDto,
            PaginatedAnnouncementsResponse,
            ResultRecord,
            CreateResultDto,
            UpdateResultDto,
            PaginatedResultsResponse,
            AttendanceRecord,
            RecordAttendanceDto,
            UpdateAttendanceDto,
            PaginatedAttendanceResponse,
            ExamTemplate,
            CreateExamTemplateDto,
            UpdateExamTemplateDto,
            PaginatedExamTemplatesResponse,
            Notification,
            CreateNotificationDto,
            SendBatchDto,
            BatchSendResponse,
            NotificationPreference,
            SetPreferenceDto,
            PaginatedNotificationsResponse,
            SchoolSettings,
            UpsertSettingsDto,
            PaginationMeta,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Accounts", description = "User account and role management"),
        (name = "Events", description = "School event management"),
        (name = "Announcements", description = "School announcements"),
        (name = "Results", description = "Academic results"),
        (name = "Attendance", description = "Attendance records"),
        (name = "Exam Templates", description = "Exam template management"),
        (name = "Notifications", description = "Notifications and preferences"),
        (name = "Settings", description = "Per-school settings")
    ),
    info(
        title = "Scholaris API",
        version = "0.1.0",
        description = "Multi-tenant school administration REST API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
