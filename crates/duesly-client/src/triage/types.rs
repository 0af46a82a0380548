#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentType {
    Required,
    Optional,
}

impl PaymentType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "required" => Some(Self::Required),
            "optional" => Some(Self::Optional),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    Pending,
}

impl PaymentStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Unpaid => "unpaid",
            Self::Pending => "pending",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "paid" => Some(Self::Paid),
            "unpaid" => Some(Self::Unpaid),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

/// One payment request as loaded from the ledger (or built by a caller).
///
/// `due_date` stays a raw string here: classification owns the parsing and
/// treats missing or unparseable values as never-due rather than as errors.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub request_id: String,
    pub title: String,
    pub amount: f64,
    pub currency: String,
    pub payment_type: PaymentType,
    pub payment_status: PaymentStatus,
    pub due_date: Option<String>,
    pub member: Option<String>,
}

impl PaymentRequest {
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }

    pub fn is_required(&self) -> bool {
        self.payment_type == PaymentType::Required
    }
}

#[cfg(test)]
mod tests {
    use super::{PaymentStatus, PaymentType};

    #[test]
    fn payment_type_parse_is_case_insensitive_and_trims() {
        assert_eq!(PaymentType::parse(" Required "), Some(PaymentType::Required));
        assert_eq!(PaymentType::parse("OPTIONAL"), Some(PaymentType::Optional));
        assert_eq!(PaymentType::parse("mandatory"), None);
    }

    #[test]
    fn payment_status_round_trips_through_as_str() {
        for status in [
            PaymentStatus::Paid,
            PaymentStatus::Unpaid,
            PaymentStatus::Pending,
        ] {
            assert_eq!(PaymentStatus::parse(status.as_str()), Some(status));
        }
    }
}
