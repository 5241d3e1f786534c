//! Items travelling through the hand-off queue

use super::traits::Customer;
use crate::order::{CustomerId, Order};
use std::fmt;
use std::sync::Arc;

/// An order waiting for a solver, with the customer to report back to
pub(crate) struct Job {
    pub(crate) customer_id: CustomerId,
    pub(crate) customer: Arc<dyn Customer>,
    pub(crate) order: Order,
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("customer_id", &self.customer_id)
            .field("order", &self.order.id)
            .field("material_id", &self.order.material_id)
            .finish()
    }
}

/// Queue item: real work, or the signal for one solver thread to exit
#[derive(Debug)]
pub(crate) enum Demand {
    Work(Job),
    Stop,
}
