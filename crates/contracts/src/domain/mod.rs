pub mod a001_petpooja_sale;
