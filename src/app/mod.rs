pub mod track_service;
