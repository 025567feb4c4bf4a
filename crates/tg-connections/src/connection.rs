use tg_core::{CellId, EdgeId, RouteId, SequenceId};

/// One scheduled vehicle movement over one trip.
///
/// `departure_time` and `arrival_time` are the scheduled times (ms); the
/// delay fields are separate offsets in ms.  A departure carries the delay
/// and reason the vehicle arrived with on the previous trip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
    pub trip: EdgeId,
    /// Departure stop; `trip` may be stored the other way round.
    pub from: CellId,
    /// Arrival stop.
    pub to: CellId,
    pub route: RouteId,
    pub departure_time: i64,
    pub arrival_time: i64,
    pub delay_departure: i64,
    pub delay_arrival: i64,
    pub delay_reason_departure: Option<String>,
    pub delay_reason_arrival: Option<String>,
    /// Shared by every connection of one route instance.
    pub sequence_id: SequenceId,
}

impl Connection {
    pub fn is_delayed(&self) -> bool {
        self.delay_departure > 0 || self.delay_arrival > 0
    }
}
