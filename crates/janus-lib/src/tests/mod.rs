mod calculator;
mod records;
