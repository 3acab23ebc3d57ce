//! Integration tests for the package sale / consumption lifecycle:
//! appointment completion, balance decrement order, exhaustion, and the
//! consumption report.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use atelier_db::models::appointment::CreateAppointment;
use atelier_db::models::client::CreateClient;
use atelier_db::models::client_package::CreateClientPackage;
use atelier_db::models::package::CreatePackage;
use atelier_db::models::service::CreateService;
use atelier_db::repositories::report_repo::ConsumptionFilters;
use atelier_db::repositories::{
    AppointmentRepo, ClientPackageRepo, ClientRepo, PackageRepo, PaymentRepo, ReportRepo,
    ServiceRepo,
};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

struct Fixture {
    client_id: Uuid,
    service_id: Uuid,
    package_id: Uuid,
}

/// Seed one client, one 150.00 service, and a 5-session / 90-day package
/// covering it.
async fn seed(pool: &PgPool) -> Fixture {
    let client = ClientRepo::create(
        pool,
        &CreateClient {
            name: "Ana Lima".to_string(),
            phone: "+5511999990000".to_string(),
            email: "ana@x.com".to_string(),
            notes: None,
            tags: None,
        },
    )
    .await
    .unwrap();

    let service = ServiceRepo::create(
        pool,
        &CreateService {
            name: "Massage".to_string(),
            description: None,
            price: 150.0,
            duration_minutes: 60,
            is_active: None,
        },
    )
    .await
    .unwrap();

    let package = PackageRepo::create(
        pool,
        &CreatePackage {
            name: "Massage 5x".to_string(),
            description: None,
            price: 600.0,
            session_count: 5,
            validity_days: 90,
            is_active: None,
            service_ids: vec![service.id],
        },
    )
    .await
    .unwrap();

    Fixture {
        client_id: client.id,
        service_id: service.id,
        package_id: package.id,
    }
}

async fn book(pool: &PgPool, fixture: &Fixture, hours_from_now: i64) -> Uuid {
    let starts = Utc::now() + Duration::hours(hours_from_now);
    AppointmentRepo::create(
        pool,
        &CreateAppointment {
            client_id: fixture.client_id,
            service_id: fixture.service_id,
            starts_at: starts,
            ends_at: starts + Duration::hours(1),
            status: None,
            notes: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn buy(pool: &PgPool, fixture: &Fixture, sessions: i32, expires_in_days: i64) -> Uuid {
    ClientPackageRepo::create(
        pool,
        &CreateClientPackage {
            client_id: fixture.client_id,
            package_id: fixture.package_id,
            expires_at: Utc::now() + Duration::days(expires_in_days),
            remaining_sessions: sessions,
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Sale
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_sale_initializes_balance_and_expiry(pool: PgPool) {
    let fixture = seed(&pool).await;
    let purchase_id = buy(&pool, &fixture, 5, 90).await;

    let purchase = ClientPackageRepo::find_by_id(&pool, purchase_id)
        .await
        .unwrap()
        .expect("purchase should exist");

    assert_eq!(purchase.remaining_sessions, 5);
    assert_eq!(purchase.status, "active");
    // purchased_at is stamped by the database a moment after expires_at was
    // computed, so the distance may truncate to 89 days and change.
    let days_to_expiry = (purchase.expires_at - purchase.purchased_at).num_days();
    assert!((89..=90).contains(&days_to_expiry), "got {days_to_expiry}");
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_completion_without_package_creates_pending_charge(pool: PgPool) {
    let fixture = seed(&pool).await;
    let appointment_id = book(&pool, &fixture, 2).await;

    let result = AppointmentRepo::complete(&pool, appointment_id)
        .await
        .unwrap()
        .expect("completion should proceed");

    assert_eq!(result.appointment.status, "completed");
    assert!(result.consumed_package_id.is_none());
    assert_eq!(result.payment.amount, 150.0);
    assert_eq!(result.payment.method, "pix");
    assert_eq!(result.payment.status, "pending");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_completion_debits_covering_package(pool: PgPool) {
    let fixture = seed(&pool).await;
    let purchase_id = buy(&pool, &fixture, 5, 90).await;
    let appointment_id = book(&pool, &fixture, 2).await;

    let result = AppointmentRepo::complete(&pool, appointment_id)
        .await
        .unwrap()
        .expect("completion should proceed");

    assert_eq!(result.consumed_package_id, Some(purchase_id));
    assert_eq!(result.payment.amount, 0.0);
    assert_eq!(result.payment.method, "package");
    assert_eq!(result.payment.status, "paid");

    let purchase = ClientPackageRepo::find_by_id(&pool, purchase_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(purchase.remaining_sessions, 4);
    assert_eq!(purchase.status, "active");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_completion_picks_soonest_expiring_package(pool: PgPool) {
    let fixture = seed(&pool).await;
    let later = buy(&pool, &fixture, 5, 90).await;
    let sooner = buy(&pool, &fixture, 5, 30).await;
    let appointment_id = book(&pool, &fixture, 2).await;

    let result = AppointmentRepo::complete(&pool, appointment_id)
        .await
        .unwrap()
        .expect("completion should proceed");

    assert_eq!(
        result.consumed_package_id,
        Some(sooner),
        "the purchase closest to expiry must be consumed first"
    );

    let untouched = ClientPackageRepo::find_by_id(&pool, later).await.unwrap().unwrap();
    assert_eq!(untouched.remaining_sessions, 5);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_completion_skips_expired_and_exhausted_purchases(pool: PgPool) {
    let fixture = seed(&pool).await;
    // Expired yesterday; still nominally active with balance.
    buy(&pool, &fixture, 5, -1).await;
    // Exhausted balance.
    buy(&pool, &fixture, 0, 90).await;
    let appointment_id = book(&pool, &fixture, 2).await;

    let result = AppointmentRepo::complete(&pool, appointment_id)
        .await
        .unwrap()
        .expect("completion should proceed");

    assert!(result.consumed_package_id.is_none());
    assert_eq!(result.payment.method, "pix");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_last_session_flips_purchase_to_exhausted(pool: PgPool) {
    let fixture = seed(&pool).await;
    let purchase_id = buy(&pool, &fixture, 1, 90).await;
    let appointment_id = book(&pool, &fixture, 2).await;

    AppointmentRepo::complete(&pool, appointment_id)
        .await
        .unwrap()
        .expect("completion should proceed");

    let purchase = ClientPackageRepo::find_by_id(&pool, purchase_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(purchase.remaining_sessions, 0);
    assert_eq!(purchase.status, "exhausted");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_second_completion_is_rejected_without_side_effects(pool: PgPool) {
    let fixture = seed(&pool).await;
    let purchase_id = buy(&pool, &fixture, 5, 90).await;
    let appointment_id = book(&pool, &fixture, 2).await;

    AppointmentRepo::complete(&pool, appointment_id)
        .await
        .unwrap()
        .expect("first completion should proceed");

    let second = AppointmentRepo::complete(&pool, appointment_id).await.unwrap();
    assert!(second.is_none(), "second completion must be refused");

    // No extra payment, no extra debit.
    let payments = PaymentRepo::list_by_appointment(&pool, appointment_id)
        .await
        .unwrap();
    assert_eq!(payments.len(), 1);

    let purchase = ClientPackageRepo::find_by_id(&pool, purchase_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(purchase.remaining_sessions, 4);
}

// ---------------------------------------------------------------------------
// Consumption report
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_report_lists_usage_in_order_and_caps_at_session_count(pool: PgPool) {
    let fixture = seed(&pool).await;

    // A 2-session package; three completed covered appointments fall inside
    // its validity window, so the usage list must cap at 2.
    ClientPackageRepo::create(
        &pool,
        &CreateClientPackage {
            client_id: fixture.client_id,
            package_id: fixture.package_id,
            expires_at: Utc::now() + Duration::days(90),
            remaining_sessions: 2,
        },
    )
    .await
    .unwrap();
    sqlx::query("UPDATE packages SET session_count = 2 WHERE id = $1")
        .bind(fixture.package_id)
        .execute(&pool)
        .await
        .unwrap();

    for hours in [2, 4, 6] {
        let id = book(&pool, &fixture, hours).await;
        AppointmentRepo::complete(&pool, id).await.unwrap().unwrap();
    }

    let rows = ReportRepo::consumption(&pool, &ConsumptionFilters::default())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.client_name, "Ana Lima");
    assert_eq!(row.package_name, "Massage 5x");
    assert_eq!(row.total_sessions, 2);
    assert_eq!(row.usage.len(), 2, "usage is capped at the session count");
    assert!(row.usage[0].used_at <= row.usage[1].used_at);
    assert_eq!(row.usage[0].service_name, "Massage");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_report_client_filter(pool: PgPool) {
    let fixture = seed(&pool).await;
    buy(&pool, &fixture, 5, 90).await;

    let rows = ReportRepo::consumption(
        &pool,
        &ConsumptionFilters {
            client_id: Some(Uuid::new_v4()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(rows.is_empty());

    let rows = ReportRepo::consumption(
        &pool,
        &ConsumptionFilters {
            client_id: Some(fixture.client_id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(rows.len(), 1);
}

// ---------------------------------------------------------------------------
// Expiry sweep
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_expiring_sweep_only_sees_near_expiry_active_purchases(pool: PgPool) {
    let fixture = seed(&pool).await;
    let near = buy(&pool, &fixture, 3, 3).await;
    buy(&pool, &fixture, 3, 60).await; // far in the future
    buy(&pool, &fixture, 0, 3).await; // no balance left

    let until = Utc::now() + Duration::days(7);
    let expiring = ClientPackageRepo::list_expiring_within(&pool, until)
        .await
        .unwrap();

    assert_eq!(expiring.len(), 1);
    assert_eq!(expiring[0].id, near);
    assert_eq!(expiring[0].client_name, "Ana Lima");
    assert_eq!(expiring[0].package_name, "Massage 5x");
}
