//! Tests for utilization calculation.

use allotment_shared::types::{BudgetItemId, ServiceEventId, UsageStrategy};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::service::UtilizationService;
use super::source::{
    EventDerivedUsage, SyntheticUsage, UsageContext, UsageSource, UsageSourceKind,
};
use crate::budget::{BudgetItem, BudgetSettings, UtilizationStatus};
use crate::pattern::UsagePattern;
use crate::session::{ItemUsage, ServiceEvent, SessionStatus, UsageIndex, UsageRecord};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

fn half_elapsed_settings() -> BudgetSettings {
    let created = now() - TimeDelta::days(50);
    BudgetSettings {
        plan_id: None,
        available_funds: dec!(1000),
        created_at: Some(created),
        end_date: Some(created + TimeDelta::days(100)),
    }
}

fn speech_item() -> BudgetItem {
    BudgetItem {
        id: BudgetItemId::from_u128(1),
        description: "Speech therapy session".to_string(),
        item_code: "SP-1".to_string(),
        category: "Speech".to_string(),
        quantity: 10,
        unit_price: dec!(50),
    }
}

fn session(days_ago: i64, code: &str, quantity: i64) -> ServiceEvent {
    ServiceEvent {
        id: ServiceEventId::new(),
        status: SessionStatus::Completed,
        occurred_at: now() - TimeDelta::days(days_ago),
        usage: vec![UsageRecord {
            item_id: None,
            item_code: Some(code.to_string()),
            quantity,
            unit_price: dec!(50),
        }],
    }
}

#[test]
fn test_six_sessions_against_half_elapsed_plan_is_normal() {
    let settings = half_elapsed_settings();
    let events: Vec<ServiceEvent> = (0..6).map(|i| session(i * 7, "SP-1", 1)).collect();
    let ctx = UsageContext::new(&settings, &events, now());
    let source = EventDerivedUsage::from_events(&events);

    let enhanced = UtilizationService::calculate(&[speech_item()], &source, &ctx);
    let item = &enhanced[0];

    assert_eq!(item.used_quantity, 6);
    assert_eq!(item.used_cost, dec!(300));
    assert_eq!(item.remaining_cost, dec!(200));
    assert_eq!(item.utilization_rate, dec!(0.6));
    assert_eq!(item.ideal_utilization, dec!(0.5));
    assert_eq!(item.utilization_delta, dec!(0.1));
    assert_eq!(item.status, UtilizationStatus::Normal);
    assert!(!item.synthetic);
}

#[test]
fn test_overrun_keeps_negative_remaining_cost() {
    let settings = half_elapsed_settings();
    let events = vec![session(1, "SP-1", 13)];
    let ctx = UsageContext::new(&settings, &events, now());
    let source = EventDerivedUsage::from_events(&events);

    let item = &UtilizationService::calculate(&[speech_item()], &source, &ctx)[0];

    assert_eq!(item.used_cost, dec!(650));
    assert_eq!(item.remaining_cost, dec!(-150));
    assert_eq!(item.utilization_rate, dec!(1.3));
    assert_eq!(item.status, UtilizationStatus::Overutilized);
}

#[test]
fn test_zero_quantity_has_zero_rate() {
    let mut item = speech_item();
    item.quantity = 0;
    let usage = ItemUsage {
        quantity: 3,
        cost: dec!(150),
        history: Vec::new(),
    };

    let enhanced = UtilizationService::enhance(&item, &usage, dec!(0.5), false);

    assert_eq!(enhanced.utilization_rate, Decimal::ZERO);
    assert_eq!(enhanced.total_cost, Decimal::ZERO);
    assert_eq!(enhanced.remaining_cost, dec!(-150));
}

#[test]
fn test_item_without_records_shows_zero_usage() {
    let settings = half_elapsed_settings();
    let events = vec![session(1, "OTHER", 2)];
    let ctx = UsageContext::new(&settings, &events, now());
    let source = EventDerivedUsage::from_events(&events);

    let item = &UtilizationService::calculate(&[speech_item()], &source, &ctx)[0];

    assert_eq!(item.used_quantity, 0);
    assert_eq!(item.status, UtilizationStatus::Underutilized);
    assert_eq!(item.usage_pattern, UsagePattern::Stable);
}

#[test]
fn test_monthly_growth_is_classified_increasing() {
    let settings = half_elapsed_settings();
    let events = vec![
        session(45, "SP-1", 1),
        session(10, "SP-1", 3),
    ];
    let ctx = UsageContext::new(&settings, &events, now());
    let source = EventDerivedUsage::from_events(&events);

    let item = &UtilizationService::calculate(&[speech_item()], &source, &ctx)[0];
    assert_eq!(item.usage_pattern, UsagePattern::Increasing);
}

#[test]
fn test_strategy_resolution() {
    let empty: Vec<ServiceEvent> = Vec::new();
    let empty_index = UsageIndex::build(&empty);
    let events = vec![session(1, "SP-1", 1)];
    let index = UsageIndex::build(&events);

    assert_eq!(
        UsageSourceKind::resolve(UsageStrategy::EventDerived, &empty_index),
        UsageSourceKind::EventDerived
    );
    assert_eq!(
        UsageSourceKind::resolve(UsageStrategy::EventDerivedOrSynthetic, &empty_index),
        UsageSourceKind::Synthetic
    );
    assert_eq!(
        UsageSourceKind::resolve(UsageStrategy::EventDerivedOrSynthetic, &index),
        UsageSourceKind::EventDerived
    );
    assert_eq!(
        UsageSourceKind::resolve(UsageStrategy::Synthetic, &index),
        UsageSourceKind::Synthetic
    );
}

#[test]
fn test_synthetic_usage_is_flagged_and_deterministic() {
    let settings = half_elapsed_settings();
    let events: Vec<ServiceEvent> = (0..10).map(|i| session(i, "SP-1", 0)).collect();
    let ctx = UsageContext::new(&settings, &events, now());

    let first = UtilizationService::calculate(&[speech_item()], &SyntheticUsage, &ctx);
    let second = UtilizationService::calculate(&[speech_item()], &SyntheticUsage, &ctx);

    assert_eq!(first, second);
    assert!(first[0].synthetic);
    // id 1: bucket5 = 1 → spread -0.08; f = (0.5 - 0.08) × 1 = 0.42 → 4 units.
    assert_eq!(first[0].used_quantity, 4);
    assert_eq!(first[0].used_cost, dec!(200));
}

#[test]
fn test_synthetic_overrun_subset_can_exceed_allocation() {
    let mut item = speech_item();
    item.id = BudgetItemId::from_u128(14); // bucket7 = 0, bucket5 = 4
    let ctx = UsageContext {
        ideal_utilization: Decimal::ONE,
        completed_events: 20,
    };

    let fraction = SyntheticUsage::fraction(&item, &ctx);
    assert_eq!(fraction, dec!(1.2));
    assert_eq!(SyntheticUsage.usage_for(&item, &ctx).quantity, 12);
}

#[test]
fn test_synthetic_without_completed_events_is_zero() {
    let ctx = UsageContext {
        ideal_utilization: dec!(0.5),
        completed_events: 0,
    };
    assert_eq!(SyntheticUsage.usage_for(&speech_item(), &ctx).quantity, 0);
}

proptest! {
    /// used_cost + remaining_cost == total_cost, overrun included.
    #[test]
    fn test_cost_identity(
        quantity in 0i64..500,
        used in 0i64..1_000,
        price_cents in 0i64..100_000,
        ideal_bps in 0i64..=10_000,
    ) {
        let mut item = speech_item();
        item.quantity = quantity;
        item.unit_price = Decimal::new(price_cents, 2);
        let usage = ItemUsage {
            quantity: used,
            cost: Decimal::from(used) * item.unit_price,
            history: Vec::new(),
        };

        let enhanced = UtilizationService::enhance(&item, &usage, Decimal::new(ideal_bps, 4), false);

        prop_assert_eq!(enhanced.used_cost + enhanced.remaining_cost, enhanced.total_cost);
        prop_assert_eq!(
            enhanced.utilization_delta,
            enhanced.utilization_rate - enhanced.ideal_utilization
        );
        if quantity == 0 {
            prop_assert_eq!(enhanced.utilization_rate, Decimal::ZERO);
        }
    }

    /// Synthetic fractions stay within their caps.
    #[test]
    fn test_synthetic_fraction_bounds(
        raw_id in any::<u128>(),
        ideal_bps in 0i64..=10_000,
        completed in 0usize..40,
    ) {
        let mut item = speech_item();
        item.id = BudgetItemId::from_u128(raw_id);
        let ctx = UsageContext {
            ideal_utilization: Decimal::new(ideal_bps, 4),
            completed_events: completed,
        };

        let fraction = SyntheticUsage::fraction(&item, &ctx);
        let cap = if raw_id % 7 == 0 { dec!(1.2) } else { Decimal::ONE };

        prop_assert!(fraction >= Decimal::ZERO);
        prop_assert!(fraction <= cap);
    }
}
