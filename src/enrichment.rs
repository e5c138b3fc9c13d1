//! Filling in ISO codes the conversion table could not provide.

use crate::records::RainfallRecord;

/// Assign ISO alpha-3 codes to records the join left without one.
///
/// Currently the identity: records come back unchanged and in the same order.
/// This is the place to plug in a manual code table or country-name matching
/// once a source for those mappings is chosen. Implementations must only ever
/// fill `iso_alpha3` on records where it is `None`.
pub fn assign_missing_iso_codes(records: Vec<RainfallRecord>) -> Vec<RainfallRecord> {
    records
}
