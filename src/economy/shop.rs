//! Supply shop — seeds, fertilizer, pesticide, and water refills.
//!
//! Every purchase goes through `Ledger::debit`, so an underfunded buy fails
//! with `InsufficientFunds` before any stock changes hands.

use crate::data::plant_def;
use crate::shared::*;

pub fn buy_seed(ledger: &mut Ledger, kind: PlantKind) -> Result<(), ActionError> {
    ledger.debit(plant_def(kind).seed_cost)?;
    ledger.add_seeds(kind, 1);
    Ok(())
}

pub fn buy_fertilizer(ledger: &mut Ledger) -> Result<(), ActionError> {
    ledger.debit(FERTILIZER_PRICE)?;
    ledger.fertilizer += 1;
    Ok(())
}

pub fn buy_pesticide(ledger: &mut Ledger) -> Result<(), ActionError> {
    ledger.debit(PESTICIDE_PRICE)?;
    ledger.pesticide += 1;
    Ok(())
}

/// Refills the watering can to capacity. Paying for a refill with a full can
/// is allowed (and pointless), matching the shop's no-questions policy.
pub fn refill_water(ledger: &mut Ledger) -> Result<(), ActionError> {
    ledger.debit(WATER_REFILL_PRICE)?;
    ledger.water_can = WATER_CAN_CAPACITY;
    Ok(())
}

pub fn purchase(ledger: &mut Ledger, order: PurchaseOrder) -> Result<(), ActionError> {
    match order {
        PurchaseOrder::Seed(kind) => buy_seed(ledger, kind),
        PurchaseOrder::Fertilizer => buy_fertilizer(ledger),
        PurchaseOrder::Pesticide => buy_pesticide(ledger),
        PurchaseOrder::WaterRefill => refill_water(ledger),
    }
}
