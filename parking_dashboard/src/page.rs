use std::{
    collections::BTreeMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tokio::sync::watch;

/// A named slot on the dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Container {
    TotalVehicles,
    CurrentVehicles,
    TotalRevenue,
    UnauthorizedExits,
    VehiclesTable,
    UnauthorizedExitsTable,
    ActivityFeed,
    DetectedPlate,
}

impl Container {
    pub fn id(self) -> &'static str {
        match self {
            Container::TotalVehicles => "total-vehicles",
            Container::CurrentVehicles => "current-vehicles",
            Container::TotalRevenue => "total-revenue",
            Container::UnauthorizedExits => "unauthorized-exits",
            Container::VehiclesTable => "vehicles-table",
            Container::UnauthorizedExitsTable => "unauthorized-exits-table",
            Container::ActivityFeed => "activity-feed",
            Container::DetectedPlate => "detected-plate",
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

pub type Generation = u64;

#[derive(Debug, Default)]
struct Slot {
    content: String,
    issued: Generation,
    committed: Generation,
}

/// Generations handed out to one refresh, one per mounted target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ticket(Vec<(Container, Generation)>);

impl Ticket {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn generation(&self, container: Container) -> Option<Generation> {
        self.0
            .iter()
            .find(|(c, _)| *c == container)
            .map(|(_, generation)| *generation)
    }
}

#[derive(Debug)]
struct Shared {
    slots: Mutex<BTreeMap<Container, Slot>>,
    revision: watch::Sender<u64>,
}

/// The set of containers a view mounts, with their current content.
///
/// Every writer takes a [`Ticket`] before it starts work and presents it on
/// [`Page::commit`]. A write lands only if its generation is newer than the
/// last one committed to that container, so a slow response can never
/// overwrite the result of a request issued after it.
#[derive(Debug, Clone)]
pub struct Page {
    shared: Arc<Shared>,
}

impl Page {
    pub fn new(mounted: impl IntoIterator<Item = Container>) -> Self {
        let slots = mounted
            .into_iter()
            .map(|c| (c, Slot::default()))
            .collect();
        let (revision, _) = watch::channel(0);
        Self {
            shared: Arc::new(Shared {
                slots: Mutex::new(slots),
                revision,
            }),
        }
    }

    fn slots(&self) -> MutexGuard<'_, BTreeMap<Container, Slot>> {
        self.shared
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_mounted(&self, container: Container) -> bool {
        self.slots().contains_key(&container)
    }

    pub fn begin(&self, targets: &[Container]) -> Ticket {
        let mut slots = self.slots();
        Ticket(
            targets
                .iter()
                .filter_map(|c| {
                    let slot = slots.get_mut(c)?;
                    slot.issued += 1;
                    Some((*c, slot.issued))
                })
                .collect(),
        )
    }

    /// Applies `writes` covered by `ticket` and returns how many landed.
    pub fn commit(
        &self,
        ticket: &Ticket,
        writes: impl IntoIterator<Item = (Container, String)>,
    ) -> usize {
        let mut applied = 0;
        {
            let mut slots = self.slots();
            for (container, content) in writes {
                let (Some(generation), Some(slot)) =
                    (ticket.generation(container), slots.get_mut(&container))
                else {
                    continue;
                };
                if generation <= slot.committed {
                    tracing::debug!(
                        "Dropping stale write to #{container} (generation {generation}, have {})",
                        slot.committed
                    );
                    continue;
                }
                slot.committed = generation;
                slot.content = content;
                applied += 1;
            }
        }
        if applied > 0 {
            self.shared.revision.send_modify(|r| *r += 1);
        }
        applied
    }

    pub fn content(&self, container: Container) -> Option<String> {
        self.slots().get(&container).map(|s| s.content.clone())
    }

    pub fn snapshot(&self) -> Vec<(Container, String)> {
        self.slots()
            .iter()
            .map(|(c, s)| (*c, s.content.clone()))
            .collect()
    }

    /// Yields whenever a commit changed at least one container.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.revision.subscribe()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unmounted_targets_are_skipped() {
        let page = Page::new([Container::CurrentVehicles, Container::TotalRevenue]);
        let ticket = page.begin(&[Container::TotalVehicles, Container::TotalRevenue]);
        assert_eq!(ticket, Ticket(vec![(Container::TotalRevenue, 1)]));

        let applied = page.commit(
            &ticket,
            [
                (Container::TotalVehicles, "10".to_string()),
                (Container::TotalRevenue, "5000 RWF".to_string()),
            ],
        );
        assert_eq!(applied, 1);
        assert_eq!(page.content(Container::TotalVehicles), None);
        assert_eq!(page.content(Container::TotalRevenue).unwrap(), "5000 RWF");
    }

    #[test]
    fn stale_generation_loses() {
        let page = Page::new([Container::VehiclesTable]);
        let older = page.begin(&[Container::VehiclesTable]);
        let newer = page.begin(&[Container::VehiclesTable]);

        assert_eq!(
            page.commit(&newer, [(Container::VehiclesTable, "new".to_string())]),
            1
        );
        assert_eq!(
            page.commit(&older, [(Container::VehiclesTable, "old".to_string())]),
            0
        );
        assert_eq!(page.content(Container::VehiclesTable).unwrap(), "new");
    }

    #[test]
    fn in_order_commits_replace_content() {
        let page = Page::new([Container::ActivityFeed]);
        for n in 0..3 {
            let ticket = page.begin(&[Container::ActivityFeed]);
            page.commit(&ticket, [(Container::ActivityFeed, format!("feed {n}"))]);
        }
        assert_eq!(page.content(Container::ActivityFeed).unwrap(), "feed 2");
    }

    #[test]
    fn writes_outside_the_ticket_are_ignored() {
        let page = Page::new([Container::VehiclesTable, Container::ActivityFeed]);
        let ticket = page.begin(&[Container::VehiclesTable]);
        let applied = page.commit(&ticket, [(Container::ActivityFeed, "feed".to_string())]);
        assert_eq!(applied, 0);
        assert_eq!(page.content(Container::ActivityFeed).unwrap(), "");
    }

    #[tokio::test]
    async fn subscribers_see_commits() {
        let page = Page::new([Container::DetectedPlate]);
        let mut revisions = page.subscribe();

        let ticket = page.begin(&[Container::DetectedPlate]);
        page.commit(&ticket, [(Container::DetectedPlate, "RAB123".to_string())]);

        revisions.changed().await.unwrap();
        assert_eq!(*revisions.borrow_and_update(), 1);
    }
}
