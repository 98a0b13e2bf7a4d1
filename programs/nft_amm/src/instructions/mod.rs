pub mod close_pool;
pub mod create_pool;
pub mod deposit_sell;
pub mod fulfill_buy;
pub mod fulfill_sell;
pub mod sol_deposit_buy;
pub mod sol_withdraw_buy;
pub mod update_pool;
pub mod withdraw_sell;

pub use close_pool::*;
pub use create_pool::*;
pub use deposit_sell::*;
pub use fulfill_buy::*;
pub use fulfill_sell::*;
pub use sol_deposit_buy::*;
pub use sol_withdraw_buy::*;
pub use update_pool::*;
pub use withdraw_sell::*;
