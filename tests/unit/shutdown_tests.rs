//! Two-phase shutdown

#[cfg(test)]
mod shutdown_tests {
    use crate::fixtures::{DelayedProducer, ScriptedCustomer};
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use welding_rs::{
        DirectQuoteSolver, EngineConfig, EngineState, Order, Piece, PriceQuote, WeldingCompany,
    };

    #[test]
    fn test_stop_releases_every_worker_handle() {
        let config = EngineConfig::default()
            .with_queue_capacity(2)
            .with_worker_count(4);
        let mut company = WeldingCompany::with_config(DirectQuoteSolver, config).expect("config");
        company
            .register_producer(Arc::new(DelayedProducer::new(
                HashMap::from([(1, vec![PriceQuote::new(1, 1, 1.0)])]),
                Duration::from_millis(2),
            )))
            .expect("register producer");

        let customers: Vec<_> = (0..3)
            .map(|_| {
                Arc::new(ScriptedCustomer::new(
                    (0..5).map(|_| Order::new(1, vec![Piece::new(1, 1)])).collect(),
                ))
            })
            .collect();
        for customer in &customers {
            company
                .register_customer(customer.clone())
                .expect("register customer");
        }

        company.start_configured().expect("start");
        company.stop().expect("stop");

        assert_eq!(company.state(), EngineState::Stopped);
        assert_eq!(company.queued_orders(), 0);
        for customer in &customers {
            assert_eq!(customer.completed_count(), 5);
            // only the test and the company still hold the customer
            assert_eq!(Arc::strong_count(customer), 2);
        }
    }

    #[test]
    fn test_stop_with_idle_pool_only() {
        let mut company = WeldingCompany::new(DirectQuoteSolver);
        company.start(8).expect("start");
        company.stop().expect("stop");

        assert_eq!(company.queued_orders(), 0);
        assert_eq!(company.stats().orders_received, 0);
    }

    #[test]
    fn test_more_solvers_than_queue_capacity() {
        let config = EngineConfig::default()
            .with_queue_capacity(1)
            .with_worker_count(6);
        let mut company = WeldingCompany::with_config(DirectQuoteSolver, config).expect("config");
        company
            .register_producer(Arc::new(DelayedProducer::new(
                HashMap::from([(2, vec![PriceQuote::new(2, 2, 2.0)])]),
                Duration::ZERO,
            )))
            .expect("register producer");
        let customer = Arc::new(ScriptedCustomer::new(
            (0..12).map(|_| Order::new(2, vec![Piece::new(2, 2)])).collect(),
        ));
        company.register_customer(customer.clone()).expect("register customer");

        company.start_configured().expect("start");
        company.stop().expect("stop");

        assert_eq!(customer.completed_count(), 12);
    }
}
