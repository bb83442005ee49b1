//! Demo binary: seeds the in-memory store and walks a typical day at the
//! front desk through the inbound ports, logging each step.

use std::env;
use std::error::Error;

use chrono::Utc;
use tracing::info;

use conserje_adapters::persistence::MemoryStore;
use conserje_adapters::seed::{month_name, seed_demo_data};
use conserje_app::announcement_service::AnnouncementService;
use conserje_app::auth_service::AuthService;
use conserje_app::directory_service::DirectoryService;
use conserje_app::expense_service::ExpenseService;
use conserje_app::message_service::MessageService;
use conserje_app::reservation_service::{ReservationService, BOOKING_HORIZON_DAYS};
use conserje_app::visitor_service::VisitorService;
use conserje_core::calendar::{CalendarDate, MonthGrid};
use conserje_ports::inbound::{
    Billing, Bulletin, Directory, FrontDoor, Mailbox, ReservationDesk, VisitorDesk,
};
use conserje_ports::types::{
    ExpenseFilter, NewMessage, NewReservation, NewVisitor, ReservationFilter, VisitorFilter,
};

const DEFAULT_ACCESS_PASSWORD: &str = "password123";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let now = Utc::now();
    let today = CalendarDate::from_instant(now);

    let store = MemoryStore::new();
    let seeded = seed_demo_data(&store, now).await?;
    info!(
        building = seeded.building.name(),
        apartments = seeded.building.total_apartments(),
        "store ready"
    );

    let access_password =
        env::var("CONSERJE_ACCESS_PASSWORD").unwrap_or_else(|_| DEFAULT_ACCESS_PASSWORD.into());
    let front_door = AuthService::new(store.clone(), access_password.clone());
    let reservations = ReservationService::new(store.clone(), store.clone(), store.clone());
    let visitors = VisitorService::new(store.clone(), store.clone());
    let billing = ExpenseService::new(store.clone(), store.clone());
    let bulletin = AnnouncementService::new(store.clone(), store.clone());
    let mailbox = MessageService::new(store.clone(), store.clone());
    let directory = DirectoryService::new(store.clone(), store.clone());

    let admin = front_door
        .authenticate(seeded.admin.email(), &access_password)
        .await?;
    let resident = front_door
        .authenticate(seeded.juan.email(), &access_password)
        .await?;
    info!(admin = %admin.name, resident = %resident.name, "sessions open");

    // Morning sweep: flag anything past its due date, then the resident
    // settles what they owe.
    let flagged = billing.refresh_overdue(now).await?;
    info!(flagged, "overdue sweep done");
    let owed = Billing::list(&billing, &resident, ExpenseFilter::default()).await?;
    for expense in &owed {
        info!(
            description = expense.description(),
            amount = expense.amount(),
            status = ?expense.status(),
            "charge"
        );
    }
    if let Some(expense) = owed.first() {
        billing.pay(&resident, &expense.id().to_string(), now).await?;
        info!(amount = expense.amount(), "expense paid");
    }

    // The booking calendar for the quincho this month: a 6-week grid with
    // closed weekdays and out-of-horizon days greyed out.
    let grid = MonthGrid::new(today.year(), today.month())?;
    let constraints = seeded.quincho.constraints(today, BOOKING_HORIZON_DAYS);
    let selectable = grid
        .cells()
        .iter()
        .filter(|cell| cell.in_month() && constraints.is_selectable(cell.date(), today))
        .count();
    info!(
        space = seeded.quincho.name(),
        month = grid.month(),
        selectable,
        "booking calendar"
    );

    // Resident books the quincho typing the date by hand, day first. The
    // quincho closes on Sundays, so pick the first open day ahead.
    let date = (1..=14)
        .map(|offset| today.plus_days(offset))
        .find(|candidate| constraints.is_selectable(*candidate, today))
        .ok_or("no bookable day within two weeks")?;
    let typed = format!("{}/{}/{}", date.day(), date.month(), date.year());
    let reservation_id = reservations
        .reserve(
            &resident,
            NewReservation {
                space_id: seeded.quincho.id().to_string(),
                date: typed,
                start_time: "12:00".into(),
                end_time: "16:00".into(),
                notes: Some("Almuerzo con amigos".into()),
            },
            now,
        )
        .await?;
    let mine = ReservationDesk::list(&reservations, &resident, ReservationFilter::default()).await?;
    info!(
        reservation = %reservation_id,
        total = mine.len(),
        "reservation confirmed"
    );

    // A visit is announced and the administrator clears it.
    let visitor_id = visitors
        .register(
            &resident,
            NewVisitor {
                name: "Diego Rojas".into(),
                document_id: "15.678.234-5".into(),
                phone: "+56944433221".into(),
                visit_date: today.plus_days(2).key(),
                visit_time: "19:00".into(),
                notes: None,
            },
            now,
        )
        .await?;
    visitors.approve(&admin, &visitor_id.to_string(), now).await?;
    let expected = VisitorDesk::list(&visitors, &admin, VisitorFilter::default(), now).await?;
    info!(visitor = %visitor_id, registered = expected.len(), "visit approved");

    // The resident raises a complaint and administration answers it.
    let message_id = mailbox
        .send(
            &resident,
            NewMessage {
                subject: "Ruido en las noches".into(),
                content: "El departamento 302 hace fiestas pasada la medianoche.".into(),
                category: "reclamo".into(),
            },
            now,
        )
        .await?;
    mailbox
        .respond(
            &admin,
            &message_id.to_string(),
            "Hablaremos con el departamento 302 esta semana.",
            now,
        )
        .await?;
    let inbox = Mailbox::list(&mailbox, &admin).await?;
    info!(message = %message_id, threads = inbox.len(), "complaint answered");

    // Administration checks who lives in the building.
    let residents = directory.list_residents(&admin, None).await?;
    for entry in &residents {
        info!(apartment = entry.apartment(), name = entry.name(), "resident");
    }

    // Administration closes the loop: finance report and the notice board.
    let summary = billing
        .monthly_summary(&admin, month_name(today.month()), today.year())
        .await?;
    info!(
        month = %summary.month,
        billed = summary.billed,
        collected = summary.collected,
        outstanding = summary.outstanding,
        "monthly summary"
    );
    let board = Bulletin::list(&bulletin, &admin).await?;
    for announcement in &board {
        info!(
            title = announcement.title(),
            pinned = announcement.is_pinned(),
            "announcement"
        );
    }

    Ok(())
}
