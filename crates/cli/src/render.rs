//! Terminal output.

#![allow(clippy::print_stdout)]

use emporium_core::{Cart, Order, Product, PublicUser, ViewType, format_price, with_tax};

pub fn line(text: &str) {
    println!("{text}");
}

pub fn products(products: &[Product], view: ViewType) {
    if products.is_empty() {
        println!("No products match.");
        return;
    }
    for product in products {
        match view {
            ViewType::List => println!(
                "{:>4}  {:<10}  {}",
                product.id,
                format_price(product.price),
                product.title
            ),
            ViewType::Grid => {
                println!("[{}] {}", product.id, product.title);
                println!(
                    "     {}  |  {}  |  {:.1} ({} reviews)",
                    format_price(product.price),
                    product.category,
                    product.rating.rate,
                    product.rating.count
                );
            }
        }
    }
    println!("{} product(s)", products.len());
}

pub fn product(product: &Product) {
    println!("{} (#{})", product.title, product.id);
    println!("Price:    {}", format_price(product.price));
    println!("Category: {}", product.category);
    println!(
        "Rating:   {:.1} from {} reviews",
        product.rating.rate, product.rating.count
    );
    println!("Image:    {}", product.image);
    println!();
    println!("{}", product.description);
}

pub fn cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Your cart is empty");
        return;
    }
    for item in cart.items() {
        println!(
            "{:>4}  {} x {:<10} = {:<10}  {}",
            item.id(),
            item.quantity(),
            format_price(item.product().price),
            format_price(item.total_price()),
            item.product().title
        );
    }
    let subtotal = cart.total_amount();
    let total = with_tax(subtotal);
    println!("Items:    {}", cart.total_quantity());
    println!("Subtotal: {}", format_price(subtotal));
    println!("Tax:      {}", format_price(total - subtotal));
    println!("Total:    {}", format_price(total));
}

pub fn user(user: &PublicUser) {
    println!("{} <{}>", user.name, user.email);
}

pub fn orders(orders: &[Order]) {
    if orders.is_empty() {
        println!("No orders yet.");
        return;
    }
    for order in orders {
        println!(
            "{}  {}  {} item(s)  {}",
            order.order_number,
            order.date.format("%Y-%m-%d %H:%M"),
            order.item_count(),
            format_price(order.total)
        );
    }
}
