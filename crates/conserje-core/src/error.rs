use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error("invalid phone format")]
    InvalidPhoneFormat,
    #[error("reservation must end after it starts")]
    InvalidTimeSlot,
    #[error("time is outside the space's bookable hours")]
    OutsideAvailableHours,
    #[error("time slot is already reserved")]
    SlotTaken,
    #[error("reservation is not awaiting confirmation")]
    ReservationNotPending,
    #[error("reservation is not confirmed")]
    ReservationNotConfirmed,
    #[error("reservation is already cancelled")]
    ReservationAlreadyCancelled,
    #[error("reservations can only be cancelled more than 24 hours in advance")]
    CancellationWindowClosed,
    #[error("space is not available for booking")]
    SpaceUnavailable,
    #[error("expense is already paid")]
    ExpenseAlreadyPaid,
    #[error("expense amount must be positive")]
    NonPositiveAmount,
    #[error("visit has already been decided")]
    VisitAlreadyDecided,
    #[error("visit is not approved")]
    VisitNotApproved,
    #[error("visit has already started")]
    VisitAlreadyStarted,
    #[error("announcement requires a title and content")]
    EmptyAnnouncement,
    #[error("message requires a subject and content")]
    EmptyMessage,
    #[error("message is closed")]
    MessageClosed,
    #[error("email is already registered")]
    DuplicateEmail,
}
