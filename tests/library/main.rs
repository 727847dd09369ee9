mod golden;
mod merging;
