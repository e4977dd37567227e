mod api_error;
mod token;
