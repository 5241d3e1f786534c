use tracing::{info, warn};
use welding_rs::{
    DirectQuoteSolver, Order, Piece, PriceCatalog, ProducerId, setup_logger, solve_sequential,
};

fn main() {
    setup_logger();

    let catalog = PriceCatalog::new(2);
    catalog.submit_quotes(ProducerId(0), 7, &demos::price_list(1, 7));
    catalog.submit_quotes(ProducerId(1), 7, &demos::price_list(2, 7));

    let Some(table) = catalog.evaluated_table(7, 2) else {
        warn!("material 7 is not evaluated");
        return;
    };
    info!("aggregated table for material 7: {:?}", table.quotes());

    let mut order = Order::new(7, vec![Piece::new(2, 3), Piece::new(3, 2), Piece::new(9, 9)]);
    match solve_sequential(&DirectQuoteSolver, &table, &mut order) {
        Ok(()) => info!("order solved at {:?}", order.total_cost()),
        Err(err) => warn!("order not solvable: {}", err),
    }

    order.pieces.pop();
    match solve_sequential(&DirectQuoteSolver, &table, &mut order) {
        Ok(()) => info!("order solved at {:?}", order.total_cost()),
        Err(err) => warn!("order not solvable: {}", err),
    }
}
