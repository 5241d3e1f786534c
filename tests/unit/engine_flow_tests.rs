//! End-to-end order flow through intake, barrier, queue and solver pool

#[cfg(test)]
mod engine_flow_tests {
    use crate::fixtures::{DelayedProducer, ScriptedCustomer};
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;
    use welding_rs::{
        DirectQuoteSolver, EngineConfig, Order, OrderId, Piece, PriceQuote, PriceTable,
        SolveError, SolveOutcome, Solver, WeldingCompany,
    };

    fn price_sheet(offset: f64) -> HashMap<u32, Vec<PriceQuote>> {
        (1..=4)
            .map(|material| {
                let base = material as f64;
                (
                    material,
                    vec![
                        PriceQuote::new(1, 2, base + offset),
                        PriceQuote::new(3, 3, base * 2.0 + offset),
                    ],
                )
            })
            .collect()
    }

    #[test]
    fn test_asynchronous_producers_price_every_order_at_minimum() {
        let config = EngineConfig::default()
            .with_queue_capacity(3)
            .with_worker_count(3);
        let mut company = WeldingCompany::with_config(DirectQuoteSolver, config).expect("config");

        let producers: Vec<_> = [(0.5, 5), (0.0, 15), (1.0, 1)]
            .into_iter()
            .map(|(offset, delay)| {
                Arc::new(DelayedProducer::new(
                    price_sheet(offset),
                    Duration::from_millis(delay),
                ))
            })
            .collect();
        for producer in &producers {
            company
                .register_producer(producer.clone())
                .expect("register producer");
        }

        let customers: Vec<_> = (0..6u64)
            .map(|c| {
                let orders = (0..10u64)
                    .map(|i| {
                        let material = ((c + i) % 4 + 1) as u32;
                        Order::with_id(
                            OrderId::from_u64(c * 100 + i),
                            material,
                            vec![Piece::new(2, 1), Piece::new(3, 3)],
                        )
                    })
                    .collect();
                Arc::new(ScriptedCustomer::new(orders))
            })
            .collect();
        for customer in &customers {
            company
                .register_customer(customer.clone())
                .expect("register customer");
        }

        company.start_configured().expect("start");
        company.stop().expect("stop");
        for producer in &producers {
            producer.join();
        }

        for customer in &customers {
            let completed = customer.completed();
            assert_eq!(completed.len(), 10);
            for (order, outcome) in completed {
                assert_eq!(outcome, Ok(()));
                let base = order.material_id as f64;
                assert_eq!(order.pieces[0].cost, Some(base));
                assert_eq!(order.pieces[1].cost, Some(base * 2.0));
            }
        }

        let stats = company.stats();
        assert_eq!(stats.orders_received, 60);
        assert_eq!(stats.orders_solved, 60);
        assert_eq!(stats.quote_requests, 12);
        assert_eq!(company.catalog_snapshot().evaluated_materials(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_single_solver_preserves_customer_order() {
        let mut company = WeldingCompany::new(DirectQuoteSolver);
        company
            .register_producer(Arc::new(DelayedProducer::new(
                price_sheet(0.0),
                Duration::from_millis(1),
            )))
            .expect("register producer");

        let ids: Vec<_> = (0..20).map(OrderId::from_u64).collect();
        let orders = ids
            .iter()
            .map(|id| Order::with_id(*id, 2, vec![Piece::new(1, 2)]))
            .collect();
        let customer = Arc::new(ScriptedCustomer::new(orders));
        company.register_customer(customer.clone()).expect("register customer");

        company.start(1).expect("start");
        company.stop().expect("stop");

        let completed_ids: Vec<_> = customer
            .completed()
            .into_iter()
            .map(|(order, _)| order.id)
            .collect();
        assert_eq!(completed_ids, ids);
    }

    #[test]
    fn test_every_order_completed_once_under_backpressure() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_in_flight = Arc::new(AtomicUsize::new(0));
        let solver = {
            let in_flight = Arc::clone(&in_flight);
            let max_in_flight = Arc::clone(&max_in_flight);
            move |order: &mut Order, prices: &PriceTable| -> SolveOutcome {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                max_in_flight.fetch_max(now, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(1));
                in_flight.fetch_sub(1, Ordering::SeqCst);
                if order.id.0.as_u128() % 3 == 0 {
                    return Err(SolveError::Failed {
                        message: "rejected".to_string(),
                    });
                }
                DirectQuoteSolver.solve(order, prices)
            }
        };

        let config = EngineConfig::default()
            .with_queue_capacity(1)
            .with_worker_count(2);
        let mut company = WeldingCompany::with_config(solver, config).expect("config");
        company
            .register_producer(Arc::new(DelayedProducer::new(
                price_sheet(0.0),
                Duration::ZERO,
            )))
            .expect("register producer");

        let customers: Vec<_> = (0..4u64)
            .map(|c| {
                let orders = (0..15u64)
                    .map(|i| {
                        Order::with_id(OrderId::from_u64(c * 15 + i), 3, vec![Piece::new(3, 3)])
                    })
                    .collect();
                Arc::new(ScriptedCustomer::new(orders))
            })
            .collect();
        for customer in &customers {
            company
                .register_customer(customer.clone())
                .expect("register customer");
        }

        company.start_configured().expect("start");
        company.stop().expect("stop");

        let mut seen: Vec<u128> = Vec::new();
        let mut failures = 0;
        for customer in &customers {
            for (order, outcome) in customer.completed() {
                seen.push(order.id.0.as_u128());
                match outcome {
                    Ok(()) => assert_eq!(order.total_cost(), Some(6.0)),
                    Err(SolveError::Failed { message }) => {
                        assert_eq!(message, "rejected");
                        assert!(!order.is_solved());
                        failures += 1;
                    }
                    Err(other) => panic!("unexpected failure {other}"),
                }
            }
        }
        seen.sort_unstable();
        assert_eq!(seen, (0..60u128).collect::<Vec<_>>());
        assert_eq!(failures, 20);
        assert!(max_in_flight.load(Ordering::SeqCst) <= 2);

        let stats = company.stats();
        assert_eq!(stats.orders_failed, 20);
        assert_eq!(stats.orders_completed(), 60);
    }
}
