pub mod churn_service;
