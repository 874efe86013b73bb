mod movie;
mod upload;
