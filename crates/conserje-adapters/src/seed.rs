//! Demo fixtures for running without a real backend: one building, an
//! administrator, two residents, two reservable spaces and a month of
//! activity, all dated relative to the supplied clock instant.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use chrono::{DateTime, NaiveTime, Utc};
use tracing::info;

use conserje_core::announcement::{Announcement, AnnouncementKind, Priority};
use conserje_core::building::Building;
use conserje_core::calendar::CalendarDate;
use conserje_core::error::DomainError;
use conserje_core::events::DomainEvent;
use conserje_core::expense::CommonExpense;
use conserje_core::message::{Message, MessageCategory};
use conserje_core::reservation::{CommonSpace, SpaceReservation};
use conserje_core::user::{Phone, Role, User};
use conserje_core::visitor::Visitor;
use conserje_ports::error::PortError;
use conserje_ports::outbound::{
    AnnouncementRepository, EventPublisher, ExpenseRepository, MessageRepository,
    ReservationRepository, SpaceRepository, UserRepository, VisitorRepository,
};

use crate::persistence::MemoryStore;

/// Handles into the seeded data, for wiring demo sessions.
pub struct Seeded {
    pub building: Building,
    pub admin: User,
    pub juan: User,
    pub ana: User,
    pub salon: CommonSpace,
    pub quincho: CommonSpace,
}

const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Spanish month label for a 1-based month number. Out-of-range
/// numbers fall back to a placeholder rather than panicking.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("Mes desconocido")
}

fn hours(range: RangeInclusive<u32>) -> Vec<NaiveTime> {
    range
        .filter_map(|h| NaiveTime::from_hms_opt(h, 0, 0))
        .collect()
}

fn hm(hour: u32, minute: u32) -> Result<NaiveTime, PortError> {
    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| PortError::Persistence(format!("bad seed time {hour}:{minute}")))
}

fn domain(err: DomainError) -> PortError {
    PortError::Persistence(format!("seed fixture rejected: {err}"))
}

pub async fn seed_demo_data(store: &MemoryStore, now: DateTime<Utc>) -> Result<Seeded, PortError> {
    let today = CalendarDate::from_instant(now);
    let mut events: Vec<DomainEvent> = Vec::new();

    let building = Building::new(
        "Edificio Los Robles".into(),
        "Av. Los Robles 1234, Providencia, Santiago".into(),
        45,
        "ProComunidad Ltda.".into(),
        now,
    );
    let building_id = building.id().clone();

    let admin = User::new(
        "admin@procomunidad.cl".into(),
        "María González".into(),
        "Administración".into(),
        Phone::new("+56987654321").map_err(domain)?,
        Role::Admin,
        building_id.clone(),
        now,
    );
    let juan = User::new(
        "juan@procomunidad.cl".into(),
        "Juan Pérez".into(),
        "301".into(),
        Phone::new("+56912345678").map_err(domain)?,
        Role::Resident,
        building_id.clone(),
        now,
    );
    let ana = User::new(
        "ana@procomunidad.cl".into(),
        "Ana Silva".into(),
        "205".into(),
        Phone::new("+56976543210").map_err(domain)?,
        Role::Resident,
        building_id.clone(),
        now,
    );
    for user in [&admin, &juan, &ana] {
        UserRepository::save(store, user).await?;
    }

    let salon = CommonSpace::new(
        building_id.clone(),
        "Salón de Eventos".into(),
        "Salón principal con cocina equipada, ideal para celebraciones.".into(),
        50,
        Some(25000),
        hours(9..=20),
        BTreeSet::new(),
        vec!["Cocina".into(), "Proyector".into(), "Terraza".into()],
    );
    let quincho = CommonSpace::new(
        building_id.clone(),
        "Quincho".into(),
        "Quincho techado con parrilla para doce personas.".into(),
        12,
        Some(15000),
        hours(10..=21),
        BTreeSet::from([0]),
        vec!["Parrilla".into(), "Lavaplatos".into()],
    );
    for space in [&salon, &quincho] {
        SpaceRepository::save(store, space).await?;
    }

    // Current month billed to both residents; Ana already paid hers.
    let due = today.plus_days(10);
    let description = format!("Gastos comunes - {} {}", month_name(due.month()), due.year());
    let juan_expense = CommonExpense::new(
        juan.id().clone(),
        building_id.clone(),
        month_name(due.month()).into(),
        due.year(),
        85000,
        description.clone(),
        due,
        now,
    )
    .map_err(domain)?;
    let mut ana_expense = CommonExpense::new(
        ana.id().clone(),
        building_id.clone(),
        month_name(due.month()).into(),
        due.year(),
        85000,
        description,
        due,
        now,
    )
    .map_err(domain)?;
    events.extend(ana_expense.pay(today, now).map_err(domain)?);

    // A charge from five weeks back that Juan never paid, so the overdue
    // sweep has something to flag.
    let old_due = CalendarDate::from_instant(now - chrono::Duration::days(35));
    let stale_expense = CommonExpense::new(
        juan.id().clone(),
        building_id.clone(),
        month_name(old_due.month()).into(),
        old_due.year(),
        82000,
        format!(
            "Gastos comunes - {} {}",
            month_name(old_due.month()),
            old_due.year()
        ),
        old_due,
        now,
    )
    .map_err(domain)?;
    for expense in [&juan_expense, &ana_expense, &stale_expense] {
        ExpenseRepository::save(store, expense).await?;
    }

    // A confirmed booking next week in the event room.
    let (mut reservation, created) = SpaceReservation::new(
        juan.id().clone(),
        salon.id().clone(),
        today.plus_days(7),
        hm(15, 0)?,
        hm(19, 0)?,
        Some("Cumpleaños familiar".into()),
        salon.fee_for(hm(15, 0)?, hm(19, 0)?),
        now,
    )
    .map_err(domain)?;
    events.extend(created);
    events.extend(reservation.confirm(now).map_err(domain)?);
    ReservationRepository::save(store, &reservation).await?;

    // One visit waiting for a decision, one already approved for today.
    let (pending_visit, created) = Visitor::new(
        juan.id().clone(),
        "Pedro Soto".into(),
        "12.345.678-9".into(),
        Phone::new("+56955512345").map_err(domain)?,
        today.plus_days(1),
        hm(18, 30)?,
        Some("Viene a dejar unas cajas".into()),
        now,
    );
    events.extend(created);
    let (mut approved_visit, created) = Visitor::new(
        ana.id().clone(),
        "Carla Muñoz".into(),
        "9.876.543-2".into(),
        Phone::new("+56955567890").map_err(domain)?,
        today,
        hm(20, 0)?,
        None,
        now,
    );
    events.extend(created);
    events.extend(approved_visit.approve(now).map_err(domain)?);
    for visitor in [&pending_visit, &approved_visit] {
        VisitorRepository::save(store, visitor).await?;
    }

    let (mut water_notice, created) = Announcement::new(
        building_id.clone(),
        "Corte de agua programado".into(),
        "El martes entre 9:00 y 13:00 se realizará mantención de la red de agua potable.".into(),
        AnnouncementKind::Maintenance,
        Priority::High,
        admin.id().clone(),
        now,
    )
    .map_err(domain)?;
    events.extend(created);
    water_notice.set_pinned(true);
    let (gym_notice, created) = Announcement::new(
        building_id.clone(),
        "Nuevas máquinas en el gimnasio".into(),
        "Ya están disponibles la trotadora y la bicicleta nuevas en el piso -1.".into(),
        AnnouncementKind::Improvement,
        Priority::Medium,
        admin.id().clone(),
        now,
    )
    .map_err(domain)?;
    events.extend(created);
    for announcement in [&water_notice, &gym_notice] {
        AnnouncementRepository::save(store, announcement).await?;
    }

    // A maintenance thread the administrator already picked up.
    let (mut leak_report, created) = Message::new(
        juan.id().clone(),
        building_id,
        "Filtración en el baño".into(),
        "Hay una filtración bajo el lavamanos del baño principal.".into(),
        MessageCategory::Maintenance,
        now,
    )
    .map_err(domain)?;
    events.extend(created);
    events.extend(
        leak_report
            .respond(
                admin.id().clone(),
                "Gracias por avisar, el gásfiter pasará mañana en la mañana.".into(),
                now,
            )
            .map_err(domain)?,
    );
    MessageRepository::save(store, &leak_report).await?;

    store.publish(events).await?;
    info!(building = building.name(), "seeded demo data");

    Ok(Seeded {
        building,
        admin,
        juan,
        ana,
        salon,
        quincho,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use conserje_ports::types::{ExpenseFilter, ReservationFilter, VisitorFilter};

    fn ts(s: &str) -> DateTime<Utc> {
        chrono::DateTime::parse_from_rfc3339(s)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[tokio::test]
    async fn seed_populates_every_table() {
        let store = MemoryStore::new();
        let now = ts("2025-01-15T10:00:00Z");
        let seeded = seed_demo_data(&store, now).await.unwrap();

        assert_eq!(store.list_all().await.unwrap().len(), 3);
        assert_eq!(store.list_active().await.unwrap().len(), 2);
        assert_eq!(
            ReservationRepository::find_by_filter(&store, &ReservationFilter::default())
                .await
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            VisitorRepository::find_by_filter(
                &store,
                &VisitorFilter::default(),
                CalendarDate::from_instant(now)
            )
            .await
            .unwrap()
            .len(),
            2
        );
        assert_eq!(
            ExpenseRepository::find_by_filter(&store, &ExpenseFilter::default())
                .await
                .unwrap()
                .len(),
            3
        );
        assert_eq!(
            AnnouncementRepository::list_for_building(&store, seeded.building.id())
                .await
                .unwrap()
                .len(),
            2
        );
        let threads = MessageRepository::list_for_building(&store, seeded.building.id())
            .await
            .unwrap();
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].responses().len(), 1);
        assert!(!store.event_log().unwrap().is_empty());
    }

    #[test]
    fn month_name_covers_the_year_and_tolerates_bad_input() {
        assert_eq!(month_name(1), "Enero");
        assert_eq!(month_name(12), "Diciembre");
        assert_eq!(month_name(0), "Mes desconocido");
        assert_eq!(month_name(13), "Mes desconocido");
    }

    #[tokio::test]
    async fn seeded_dates_track_the_clock() {
        let store = MemoryStore::new();
        let now = ts("2025-06-10T10:00:00Z");
        seed_demo_data(&store, now).await.unwrap();

        let reservations =
            ReservationRepository::find_by_filter(&store, &ReservationFilter::default())
                .await
                .unwrap();
        assert_eq!(reservations[0].date().key(), "2025-06-17");

        let expenses = ExpenseRepository::find_by_filter(&store, &ExpenseFilter::default())
            .await
            .unwrap();
        assert!(expenses.iter().any(|e| e.month() == "Junio"));
        assert!(expenses.iter().any(|e| e.month() == "Mayo"));
    }
}
