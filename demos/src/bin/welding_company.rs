use demos::{AsyncProducer, SyncProducer, TestCustomer};
use std::sync::Arc;
use tracing::{error, info};
use welding_rs::{DirectQuoteSolver, EngineConfig, EngineError, WeldingCompany, setup_logger};

const CUSTOMERS: usize = 3;
const ORDERS_PER_CUSTOMER: usize = 10;

fn main() {
    setup_logger();

    let config = EngineConfig::default().with_worker_count(2);
    let mut company = match WeldingCompany::with_config(DirectQuoteSolver, config) {
        Ok(company) => company,
        Err(err) => {
            error!("invalid configuration: {}", err);
            return;
        }
    };

    let sync_producer = Arc::new(SyncProducer::new(1));
    let async_producer = Arc::new(AsyncProducer::new(2));
    let customers: Vec<_> = (0..CUSTOMERS)
        .map(|_| Arc::new(TestCustomer::new(ORDERS_PER_CUSTOMER)))
        .collect();

    if let Err(err) = register(&mut company, sync_producer, async_producer.clone(), &customers) {
        error!("registration failed: {}", err);
        return;
    }

    async_producer.start();
    if let Err(err) = company.start_configured() {
        error!("start failed: {}", err);
    }
    if let Err(err) = company.stop() {
        error!("stop failed: {}", err);
    }
    async_producer.stop();

    for (index, customer) in customers.iter().enumerate() {
        let (solved, failed) = customer.results();
        info!("customer {}: {} solved, {} failed", index, solved, failed);
    }
    info!("stats: {:?}", company.stats());
    match company.catalog_snapshot().to_json() {
        Ok(json) => info!("catalog: {}", json),
        Err(err) => error!("catalog snapshot failed: {}", err),
    }
}

fn register(
    company: &mut WeldingCompany,
    sync_producer: Arc<SyncProducer>,
    async_producer: Arc<AsyncProducer>,
    customers: &[Arc<TestCustomer>],
) -> Result<(), EngineError> {
    company.register_producer(sync_producer)?;
    company.register_producer(async_producer)?;
    for customer in customers {
        company.register_customer(customer.clone())?;
    }
    Ok(())
}
