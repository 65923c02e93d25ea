//! Decide intra-state vs inter-state treatment from the two parties.

use crate::gstin::{is_inter_state_transaction, state_code_from_gstin};

use super::types::{Party, SupplyType};

/// Determine the supply type for a document between `seller` and `buyer`.
///
/// # Logic
///
/// 1. Both parties have a GSTIN → compare their state codes
///    (a malformed GSTIN on either side means intra-state)
/// 2. Buyer has no GSTIN but a place of supply → compare it with the
///    seller's GSTIN state
/// 3. Otherwise → `IntraState`
pub fn determine_supply_type(seller: &Party, buyer: &Party) -> SupplyType {
    let seller_gstin = seller.gstin.as_deref();

    if let (Some(seller_gstin), Some(buyer_gstin)) = (seller_gstin, buyer.gstin.as_deref()) {
        let supply = SupplyType::from_inter_state(is_inter_state_transaction(
            seller_gstin,
            buyer_gstin,
        ));
        tracing::debug!(?supply, "supply type from GSTIN state codes");
        return supply;
    }

    let seller_state = seller_gstin.and_then(state_code_from_gstin);
    if let (Some(seller_state), Some(place)) = (seller_state, buyer.place_of_supply.as_deref()) {
        let supply = SupplyType::from_inter_state(seller_state != place.trim());
        tracing::debug!(?supply, place_of_supply = place, "supply type from place of supply");
        return supply;
    }

    SupplyType::IntraState
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PartyBuilder;

    fn seller() -> Party {
        PartyBuilder::new("Suryodaya Solar")
            .gstin("27AAPFU0939F1ZV")
            .build()
    }

    #[test]
    fn same_state_gstins() {
        let buyer = PartyBuilder::new("Buyer").gstin("27ABCDE1234F1Z5").build();
        assert_eq!(determine_supply_type(&seller(), &buyer), SupplyType::IntraState);
    }

    #[test]
    fn different_state_gstins() {
        let buyer = PartyBuilder::new("Buyer").gstin("29AAGCB7383J1Z4").build();
        assert_eq!(determine_supply_type(&seller(), &buyer), SupplyType::InterState);
    }

    #[test]
    fn malformed_buyer_gstin_is_intra_state() {
        let buyer = PartyBuilder::new("Buyer")
            .gstin("29-not-a-gstin")
            .place_of_supply("29")
            .build();
        assert_eq!(determine_supply_type(&seller(), &buyer), SupplyType::IntraState);
    }

    #[test]
    fn unregistered_buyer_place_of_supply() {
        let buyer = PartyBuilder::new("Homeowner").place_of_supply("24").build();
        assert_eq!(determine_supply_type(&seller(), &buyer), SupplyType::InterState);

        let local = PartyBuilder::new("Homeowner").place_of_supply("27").build();
        assert_eq!(determine_supply_type(&seller(), &local), SupplyType::IntraState);
    }

    #[test]
    fn nothing_known_defaults_to_intra_state() {
        let unregistered_seller = PartyBuilder::new("Seller").build();
        let buyer = PartyBuilder::new("Buyer").place_of_supply("29").build();
        assert_eq!(
            determine_supply_type(&unregistered_seller, &buyer),
            SupplyType::IntraState
        );
    }
}
