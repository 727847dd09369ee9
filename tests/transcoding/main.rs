mod batch;
mod events;
