pub mod equipment_service;

pub use equipment_service::EquipmentService;
