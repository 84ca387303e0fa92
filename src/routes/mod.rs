pub mod account_routes;
pub mod fuel_record_routes;
pub mod notification_routes;
pub mod report_routes;
pub mod service_record_routes;
pub mod task_routes;
pub mod tire_routes;
pub mod vehicle_routes;
