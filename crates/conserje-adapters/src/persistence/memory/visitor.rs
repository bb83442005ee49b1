use async_trait::async_trait;

use conserje_core::calendar::CalendarDate;
use conserje_core::visitor::Visitor;
use conserje_ports::error::PortError;
use conserje_ports::outbound::VisitorRepository;
use conserje_ports::types::{DateScope, VisitorFilter};

use super::{lock, MemoryStore};

fn in_scope(visitor: &Visitor, scope: DateScope, today: CalendarDate) -> bool {
    match scope {
        DateScope::All => true,
        DateScope::Today => visitor.visit_date() == today,
        DateScope::Upcoming => visitor.visit_date() > today,
        DateScope::Past => visitor.visit_date() < today,
    }
}

fn matches_search(visitor: &Visitor, search: &str) -> bool {
    let needle = search.to_lowercase();
    visitor.name().to_lowercase().contains(&needle)
        || visitor.document_id().to_lowercase().contains(&needle)
        || visitor.phone().as_str().contains(&needle)
}

#[async_trait]
impl VisitorRepository for MemoryStore {
    async fn save(&self, visitor: &Visitor) -> Result<(), PortError> {
        let mut visitors = lock(&self.inner.visitors)?;
        if let Some(pos) = visitors.iter().position(|v| v.id() == visitor.id()) {
            visitors[pos] = visitor.clone();
        } else {
            visitors.push(visitor.clone());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Visitor>, PortError> {
        let visitors = lock(&self.inner.visitors)?;
        Ok(visitors.iter().find(|v| v.id().to_string() == id).cloned())
    }

    async fn find_by_filter(
        &self,
        filter: &VisitorFilter,
        today: CalendarDate,
    ) -> Result<Vec<Visitor>, PortError> {
        let visitors = lock(&self.inner.visitors)?;
        let mut matched: Vec<Visitor> = visitors
            .iter()
            .filter(|v| filter.host_id.as_ref().map_or(true, |h| v.host_id() == h))
            .filter(|v| filter.status.map_or(true, |s| v.status() == s))
            .filter(|v| in_scope(v, filter.scope, today))
            .filter(|v| filter.search.as_deref().map_or(true, |s| matches_search(v, s)))
            .cloned()
            .collect();
        matched.sort_by_key(|v| (v.visit_date(), v.visit_time()));
        Ok(matched)
    }
}
