use anchor_lang::error_code;

#[error_code]
pub enum LotteryError {
    Overflow,
    #[msg("Package does not exist, is inactive or has no combinations")]
    InvalidPackage,
    #[msg("Package not found")]
    PackageNotFound,
    #[msg("Number of combinations does not match the package")]
    CombinationMismatch,
    #[msg("Insufficient token balance to buy this package")]
    InsufficientBalance,
    #[msg("Too soon since the last participation")]
    RateLimited,
    #[msg("Token transfer failed")]
    TransferFailed,
    #[msg("Only the lottery operator can perform this action")]
    Unauthorized,
    #[msg("Index out of range")]
    OutOfRange,
    #[msg("Winning numbers must contain exactly 5 main numbers")]
    InvalidWinningNumbers,
    #[msg("A draw is currently in progress")]
    DrawInProgress,
    #[msg("The participant limit for this round has been reached")]
    TooManyParticipants,
    #[msg("Percentage is out of range")]
    InvalidPercentage,
    #[msg("Participation interval cannot be negative")]
    InvalidInterval,
    #[msg("Entry account does not match the next participant of the draw")]
    ParticipantMismatch,
    #[msg("Token account does not belong to the participant or uses another mint")]
    InvalidTokenAccount,
    #[msg("Participant accounts do not match the pending part of the draw")]
    MissingParticipantAccounts,
    #[msg("Ticket limit for this round has been reached")]
    TooManyTickets,
    #[msg("The package catalog is full")]
    CatalogFull,
    #[msg("The draw is not in the expected phase")]
    InvalidDrawPhase,
}
