//! Barrier behaviour observed through the public engine API

#[cfg(test)]
mod barrier_tests {
    use crate::fixtures::{ManualProducer, ScriptedCustomer};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;
    use welding_rs::{DirectQuoteSolver, Order, Piece, PriceQuote, WeldingCompany};

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_repeated_price_list_does_not_open_barrier() {
        let mut company = WeldingCompany::new(DirectQuoteSolver);
        let producer_a = Arc::new(ManualProducer::default());
        let producer_b = Arc::new(ManualProducer::default());
        company.register_producer(producer_a.clone()).expect("register a");
        company.register_producer(producer_b.clone()).expect("register b");
        let customer = Arc::new(ScriptedCustomer::new(vec![Order::new(
            4,
            vec![Piece::new(1, 5)],
        )]));
        company.register_customer(customer.clone()).expect("register customer");
        company.start(2).expect("start");

        let sink_a = producer_a.wait_for_sink(TIMEOUT).expect("request to A");
        let quotes = [PriceQuote::new(5, 1, 2.0)];
        assert_eq!(sink_a.submit(&quotes), 1);
        assert_eq!(sink_a.submit(&quotes), 1);

        thread::sleep(Duration::from_millis(50));
        assert_eq!(customer.completed_count(), 0);
        assert!(!company.catalog().is_evaluated(4, 2));

        let sink_b = producer_b.wait_for_sink(TIMEOUT).expect("request to B");
        assert_eq!(sink_b.submit(&[]), 2);
        company.stop().expect("stop");

        let completed = customer.completed();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].0.total_cost(), Some(2.0));
        assert_eq!(company.catalog().price_table(4).map(|t| t.len()), Some(1));
    }

    #[test]
    fn test_waiting_customers_released_together() {
        let mut company = WeldingCompany::new(DirectQuoteSolver);
        let producer = Arc::new(ManualProducer::default());
        company.register_producer(producer.clone()).expect("register producer");

        let customers: Vec<_> = (0..5)
            .map(|_| {
                Arc::new(ScriptedCustomer::new(vec![Order::new(
                    9,
                    vec![Piece::new(2, 2)],
                )]))
            })
            .collect();
        for customer in &customers {
            company
                .register_customer(customer.clone())
                .expect("register customer");
        }
        company.start(2).expect("start");

        let sink = producer.wait_for_sink(TIMEOUT).expect("request");
        thread::sleep(Duration::from_millis(30));
        assert!(customers.iter().all(|c| c.completed_count() == 0));

        sink.submit(&[PriceQuote::new(2, 2, 1.25)]);
        company.stop().expect("stop");

        for customer in &customers {
            let completed = customer.completed();
            assert_eq!(completed.len(), 1);
            assert_eq!(completed[0].0.total_cost(), Some(1.25));
        }
    }
}
