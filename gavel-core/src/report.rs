//! Fixed reporting queries
//!
//! Aggregations, joins and the division query. Their shape never changes;
//! only scalar filter values are bound.

use serde::{Deserialize, Serialize};

use crate::builder::BoundStatement;
use crate::value::BindValue;

/// Reporting query with its scalar arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum Report {
    /// Highest bid placed on one item.
    MaxBid { item_id: i32 },
    /// Items assessed by one appraiser, with the appraiser's name.
    AppraisedItems { appraiser_id: i32 },
    /// Session venues whose smallest session still lists at least `min_items`.
    SessionsWithMinItems { min_items: i32 },
    /// Dates whose average commission beats the overall average.
    AboveAverageCommission,
    /// Vehicles that collect from every storage facility.
    FullCoverageVehicles,
}

const MAX_BID_SQL: &str = "SELECT \"itemID\", MAX(\"amount\") AS \"maxBid\" \
     FROM \"Bids_Receive_Places\" \
     WHERE \"itemID\" = $1 \
     GROUP BY \"itemID\"";

const APPRAISED_ITEMS_SQL: &str = "SELECT a.\"appraiserName\", ap.\"itemID\" \
     FROM \"Appraiser\" a \
     JOIN \"Appraises\" ap ON a.\"appraiserID\" = ap.\"appraiserID\" \
     WHERE a.\"appraiserID\" = $1";

const SESSIONS_WITH_MIN_ITEMS_SQL: &str = "SELECT \"address\", \"phoneNumber\" \
     FROM \"AuctionSession_Operates\" \
     GROUP BY \"address\", \"phoneNumber\" \
     HAVING MIN(\"numItems\") >= $1";

const ABOVE_AVERAGE_COMMISSION_SQL: &str = "SELECT a1.\"event_date\", AVG(a1.\"commissionPercent\") AS \"avgCommission\" \
     FROM \"AuctionSession_Operates\" a1 \
     GROUP BY a1.\"event_date\" \
     HAVING AVG(a1.\"commissionPercent\") > \
     (SELECT AVG(a2.\"commissionPercent\") FROM \"AuctionSession_Operates\" a2)";

const FULL_COVERAGE_SQL: &str = "SELECT DISTINCT c.\"licensePlate\" \
     FROM \"CollectsFrom\" c \
     WHERE NOT EXISTS (\
     SELECT s.\"address\" FROM \"StorageFacility\" s \
     EXCEPT \
     SELECT cf.\"address\" FROM \"CollectsFrom\" cf WHERE cf.\"licensePlate\" = c.\"licensePlate\")";

impl Report {
    /// Output column names, in result order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Report::MaxBid { .. } => &["itemID", "maxBid"],
            Report::AppraisedItems { .. } => &["appraiserName", "itemID"],
            Report::SessionsWithMinItems { .. } => &["address", "phoneNumber"],
            Report::AboveAverageCommission => &["event_date", "avgCommission"],
            Report::FullCoverageVehicles => &["licensePlate"],
        }
    }

    pub fn statement(&self) -> BoundStatement {
        match *self {
            Report::MaxBid { item_id } => {
                BoundStatement::new(MAX_BID_SQL, vec![BindValue::Int(item_id)])
            }
            Report::AppraisedItems { appraiser_id } => {
                BoundStatement::new(APPRAISED_ITEMS_SQL, vec![BindValue::Int(appraiser_id)])
            }
            Report::SessionsWithMinItems { min_items } => {
                BoundStatement::new(SESSIONS_WITH_MIN_ITEMS_SQL, vec![BindValue::Int(min_items)])
            }
            Report::AboveAverageCommission => {
                BoundStatement::new(ABOVE_AVERAGE_COMMISSION_SQL, Vec::new())
            }
            Report::FullCoverageVehicles => BoundStatement::new(FULL_COVERAGE_SQL, Vec::new()),
        }
    }
}
