pub mod use_appointments;
pub mod use_business_data;
pub mod use_calendar;
pub mod use_call_stream;
pub mod use_periodic_refresh;
pub mod use_polling_fetch;
