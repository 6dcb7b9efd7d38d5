pub mod health_controller;
