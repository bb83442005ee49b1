use async_trait::async_trait;
use chrono::{DateTime, Utc};

use conserje_core::calendar::{CalendarDate, DateConstraints};
use conserje_core::ids::VisitorId;
use conserje_core::user::Phone;
use conserje_core::visitor::Visitor;
use conserje_ports::error::{DeskError, PortError};
use conserje_ports::inbound::VisitorDesk;
use conserje_ports::outbound::{EventPublisher, VisitorRepository};
use conserje_ports::types::{NewVisitor, Session, VisitorFilter};

use crate::error::AppError;
use crate::forms::{parse_date_text, parse_time};

pub struct VisitorService<V, EP>
where
    V: VisitorRepository,
    EP: EventPublisher,
{
    visitors: V,
    events: EP,
}

impl<V, EP> VisitorService<V, EP>
where
    V: VisitorRepository,
    EP: EventPublisher,
{
    pub fn new(visitors: V, events: EP) -> Self {
        Self { visitors, events }
    }

    /// Announces a visitor on behalf of the logged-in resident. The visit
    /// date may not lie in the past; any weekday is fine.
    pub async fn register(
        &self,
        session: &Session,
        request: NewVisitor,
        now: DateTime<Utc>,
    ) -> Result<VisitorId, AppError> {
        let today = CalendarDate::from_instant(now);
        let visit_date = parse_date_text(&request.visit_date, today)?;
        DateConstraints::new().check(visit_date, today)?;
        let visit_time = parse_time(&request.visit_time)?;
        let phone = Phone::new(&request.phone)?;

        let (visitor, events) = Visitor::new(
            session.user_id.clone(),
            request.name,
            request.document_id,
            phone,
            visit_date,
            visit_time,
            request.notes,
            now,
        );
        let id = visitor.id().clone();
        self.visitors.save(&visitor).await?;
        self.events.publish(events).await?;
        Ok(id)
    }

    pub async fn approve(
        &self,
        session: &Session,
        visitor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        self.decide(session, visitor_id, now, Visitor::approve).await
    }

    pub async fn reject(
        &self,
        session: &Session,
        visitor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        self.decide(session, visitor_id, now, Visitor::reject).await
    }

    pub async fn complete(
        &self,
        session: &Session,
        visitor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        self.decide(session, visitor_id, now, Visitor::complete).await
    }

    /// Host withdrawing an announced visit. Admins may do it on the host's
    /// behalf.
    pub async fn cancel(
        &self,
        session: &Session,
        visitor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let mut visitor = self.load(visitor_id).await?;
        if visitor.host_id() != &session.user_id && !session.is_admin() {
            return Err(AppError::Forbidden);
        }
        let events = visitor.cancel(now)?;
        self.visitors.save(&visitor).await?;
        self.events.publish(events).await?;
        Ok(())
    }

    /// Residents see their own registrations; admins see the whole desk.
    pub async fn list(
        &self,
        session: &Session,
        mut filter: VisitorFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<Visitor>, AppError> {
        if !session.is_admin() {
            filter.host_id = Some(session.user_id.clone());
        }
        let today = CalendarDate::from_instant(now);
        Ok(self.visitors.find_by_filter(&filter, today).await?)
    }

    /// Approve/reject/complete are administration decisions.
    async fn decide(
        &self,
        session: &Session,
        visitor_id: &str,
        now: DateTime<Utc>,
        transition: impl Fn(
            &mut Visitor,
            DateTime<Utc>,
        ) -> Result<Vec<conserje_core::events::DomainEvent>, conserje_core::error::DomainError>,
    ) -> Result<(), AppError> {
        if !session.is_admin() {
            return Err(AppError::Forbidden);
        }
        let mut visitor = self.load(visitor_id).await?;
        let events = transition(&mut visitor, now)?;
        self.visitors.save(&visitor).await?;
        self.events.publish(events).await?;
        Ok(())
    }

    async fn load(&self, visitor_id: &str) -> Result<Visitor, AppError> {
        self.visitors
            .find_by_id(visitor_id)
            .await?
            .ok_or(AppError::Port(PortError::NotFound))
    }
}

#[async_trait]
impl<V, EP> VisitorDesk for VisitorService<V, EP>
where
    V: VisitorRepository,
    EP: EventPublisher,
{
    async fn register(
        &self,
        session: &Session,
        request: NewVisitor,
        now: DateTime<Utc>,
    ) -> Result<VisitorId, DeskError> {
        VisitorService::register(self, session, request, now)
            .await
            .map_err(Into::into)
    }

    async fn approve(
        &self,
        session: &Session,
        visitor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DeskError> {
        VisitorService::approve(self, session, visitor_id, now)
            .await
            .map_err(Into::into)
    }

    async fn reject(
        &self,
        session: &Session,
        visitor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DeskError> {
        VisitorService::reject(self, session, visitor_id, now)
            .await
            .map_err(Into::into)
    }

    async fn complete(
        &self,
        session: &Session,
        visitor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DeskError> {
        VisitorService::complete(self, session, visitor_id, now)
            .await
            .map_err(Into::into)
    }

    async fn cancel(
        &self,
        session: &Session,
        visitor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DeskError> {
        VisitorService::cancel(self, session, visitor_id, now)
            .await
            .map_err(Into::into)
    }

    async fn list(
        &self,
        session: &Session,
        filter: VisitorFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<Visitor>, DeskError> {
        VisitorService::list(self, session, filter, now)
            .await
            .map_err(Into::into)
    }
}
