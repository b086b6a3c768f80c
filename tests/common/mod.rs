// Shared capture fixtures for integration tests
#![allow(dead_code)]

use serde_json::{json, Value};

/// KVM/QEMU virtual machine capture
pub fn vm_capture() -> Value {
    json!({
        "hardware": {
            "node": "test-vm-worker-1",
            "data": {
                "id": "computer",
                "class": "system",
                "description": "Computer",
                "product": "KVM (8.6.0)",
                "vendor": "Red Hat",
                "version": "RHEL-8.6.0 PC (Q35 + ICH9, 2009)",
                "configuration": {
                    "boot": "normal",
                    "family": "Red Hat Enterprise Linux",
                    "sku": "8.6.0"
                },
                "children": [{
                    "id": "core",
                    "class": "bus",
                    "description": "Motherboard",
                    "product": "RHEL-AV",
                    "vendor": "Red Hat",
                    "children": [
                        {
                            "id": "cpu:0",
                            "class": "processor",
                            "description": "CPU",
                            "product": "Intel(R) Xeon(R) Gold 6330N CPU @ 2.20GHz",
                            "vendor": "Intel Corp.",
                            "businfo": "cpu@0",
                            "size": 2200000000u64,
                            "configuration": {"cores": "4", "enabledcores": "4", "threads": "8"}
                        },
                        {
                            "id": "cpu:1",
                            "class": "processor",
                            "description": "CPU",
                            "product": "Intel(R) Xeon(R) Gold 6330N CPU @ 2.20GHz",
                            "vendor": "Intel Corp.",
                            "businfo": "cpu@1",
                            "size": 2200000000u64,
                            "configuration": {"cores": "4", "enabledcores": "4", "threads": "8"}
                        },
                        {
                            "id": "memory",
                            "class": "memory",
                            "description": "System Memory",
                            "size": 68719476736u64,
                            "children": [
                                {"id": "bank:0", "class": "memory", "description": "DIMM RAM",
                                 "vendor": "Red Hat", "size": 17179869184u64},
                                {"id": "bank:1", "class": "memory", "description": "DIMM RAM",
                                 "vendor": "Red Hat", "size": 17179869184u64},
                                {"id": "bank:2", "class": "memory", "description": "DIMM RAM",
                                 "vendor": "Red Hat", "size": 17179869184u64},
                                {"id": "bank:3", "class": "memory", "description": "DIMM RAM",
                                 "vendor": "Red Hat", "size": 17179869184u64}
                            ]
                        },
                        {
                            "id": "firmware",
                            "class": "memory",
                            "description": "BIOS",
                            "vendor": "EFI Development Kit II / OVMF",
                            "version": "0.0.0",
                            "date": "02/06/2015",
                            "capabilities": {"uefi": "UEFI specification is supported"}
                        },
                        {
                            "id": "pci",
                            "class": "bridge",
                            "description": "Host bridge",
                            "product": "82G33/G31/P35/P31 Express DRAM Controller [8086:29C0]",
                            "vendor": "Intel Corporation [8086]",
                            "businfo": "pci@0000:00:00.0",
                            "children": [
                                {
                                    "id": "network",
                                    "class": "network",
                                    "description": "Ethernet controller",
                                    "product": "Virtio 1.0 network device [1AF4:1041]",
                                    "vendor": "Red Hat, Inc. [1AF4]",
                                    "businfo": "pci@0000:03:00.0",
                                    "configuration": {"driver": "virtio-pci"},
                                    "children": [{
                                        "id": "virtio0",
                                        "class": "network",
                                        "description": "Ethernet interface",
                                        "logicalname": "enp3s0",
                                        "configuration": {
                                            "autonegotiation": "off",
                                            "driver": "virtio_net",
                                            "driverversion": "1.0.0",
                                            "link": "yes"
                                        }
                                    }]
                                },
                                {
                                    "id": "scsi",
                                    "class": "storage",
                                    "description": "SCSI storage controller",
                                    "product": "Virtio 1.0 SCSI [1AF4:1048]",
                                    "vendor": "Red Hat, Inc. [1AF4]",
                                    "businfo": "pci@0000:05:00.0",
                                    "children": [{
                                        "id": "virtio2",
                                        "class": "generic",
                                        "description": "Virtual I/O device",
                                        "children": [{
                                            "id": "disk:0",
                                            "class": "disk",
                                            "description": "SCSI Disk",
                                            "product": "QEMU HARDDISK",
                                            "vendor": "QEMU",
                                            "businfo": "scsi@0:0.0.0",
                                            "logicalname": "/dev/sda",
                                            "size": 107374182400u64
                                        }]
                                    }]
                                }
                            ]
                        }
                    ]
                }]
            }
        }
    })
}

/// Dell PowerEdge bare-metal capture with Broadcom, Intel and Mellanox NICs
pub fn bare_metal_capture() -> Value {
    json!({
        "hardware": {
            "node": "server-sno-01",
            "data": {
                "id": "computer",
                "class": "system",
                "description": "Rack Mount Chassis",
                "product": "PowerEdge R750 (SKU=090E;ModelName=PowerEdge R750)",
                "vendor": "Dell Inc.",
                "configuration": {"family": "PowerEdge"},
                "children": [{
                    "id": "core",
                    "class": "bus",
                    "description": "Motherboard",
                    "product": "0K3GYT",
                    "vendor": "Dell Inc.",
                    "children": [
                        cpu("cpu:0", "cpu@0"),
                        cpu("cpu:1", "cpu@1"),
                        memory_bank("memory:0"),
                        memory_bank("memory:1"),
                        {
                            "id": "firmware",
                            "class": "memory",
                            "description": "BIOS",
                            "vendor": "Dell Inc.",
                            "version": "2.9.1",
                            "date": "01/15/2024",
                            "capabilities": {"uefi": "UEFI specification is supported"}
                        },
                        {
                            "id": "pci:0",
                            "class": "bridge",
                            "description": "Host bridge",
                            "product": "Intel Corporation",
                            "vendor": "Intel Corporation [8086]",
                            "businfo": "pci@0000:00:00.0",
                            "children": [
                                {
                                    "id": "network:0",
                                    "class": "network",
                                    "description": "Ethernet interface",
                                    "product": "NetXtreme BCM5720 [14E4:165F]",
                                    "vendor": "Broadcom Inc. [14E4]",
                                    "businfo": "pci@0000:04:00.0",
                                    "logicalname": "eno8303",
                                    "configuration": {
                                        "autonegotiation": "on",
                                        "driver": "tg3",
                                        "driverversion": "3.137",
                                        "firmware": "FFV21.80.8 bc 5720-v1.39",
                                        "link": "no",
                                        "speed": "1Gbit/s",
                                        "duplex": "full"
                                    }
                                },
                                {
                                    "id": "network:1",
                                    "class": "network",
                                    "description": "Ethernet interface",
                                    "product": "Ethernet Controller E810-XXV [8086:159B]",
                                    "vendor": "Intel Corporation [8086]",
                                    "businfo": "pci@0000:51:00.0",
                                    "logicalname": "ens1f0",
                                    "configuration": {
                                        "autonegotiation": "on",
                                        "driver": "ice",
                                        "driverversion": "1.9.11",
                                        "firmware": "4.20 0x8001778b 22.0.9",
                                        "link": "yes",
                                        "speed": "25Gbit/s",
                                        "duplex": "full"
                                    }
                                },
                                {
                                    "id": "network:2",
                                    "class": "network",
                                    "description": "Ethernet interface",
                                    "product": "MT27710 Family [ConnectX-4 Lx] [15B3:1015]",
                                    "vendor": "Mellanox Technologies [15B3]",
                                    "businfo": "pci@0000:9d:00.0",
                                    "logicalname": "ens5f0",
                                    "configuration": {
                                        "autonegotiation": "on",
                                        "driver": "mlx5_core",
                                        "driverversion": "5.7-1.0.2",
                                        "firmware": "14.32.2004 (DEL0000000015)",
                                        "link": "yes",
                                        "speed": "25Gbit/s",
                                        "duplex": "full"
                                    }
                                },
                                {
                                    "id": "network:3",
                                    "class": "network",
                                    "description": "Ethernet interface",
                                    "product": "MT27710 Family [ConnectX-4 Lx Virtual Function] [15B3:1016]",
                                    "vendor": "Mellanox Technologies [15B3]",
                                    "businfo": "pci@0000:9d:01.0",
                                    "logicalname": "ens5f0v0",
                                    "configuration": {"driver": "mlx5_core", "link": "yes"}
                                },
                                {
                                    "id": "storage",
                                    "class": "storage",
                                    "description": "RAID bus controller",
                                    "product": "PERC H755 Controller [1028:2270]",
                                    "vendor": "Dell [1028]",
                                    "businfo": "pci@0000:65:00.0"
                                },
                                {
                                    "id": "nvme",
                                    "class": "storage",
                                    "description": "Non-Volatile memory controller",
                                    "product": "NVMe SSD Controller PM1733 [144D:A824]",
                                    "vendor": "Samsung Electronics Co Ltd [144D]",
                                    "businfo": "pci@0000:c1:00.0",
                                    "children": [{
                                        "id": "namespace:0",
                                        "class": "disk",
                                        "description": "NVMe disk",
                                        "businfo": "nvme@0:1",
                                        "logicalname": "/dev/nvme0n1",
                                        "size": 1920383410176u64
                                    }]
                                },
                                {
                                    "id": "generic",
                                    "class": "generic",
                                    "description": "Processing accelerators",
                                    "product": "ACC100 [8086:0D5C]",
                                    "vendor": "Intel Corporation [8086]",
                                    "businfo": "pci@0000:b1:00.0"
                                }
                            ]
                        }
                    ]
                }]
            }
        }
    })
}

fn cpu(id: &str, businfo: &str) -> Value {
    json!({
        "id": id,
        "class": "processor",
        "description": "CPU",
        "product": "Intel(R) Xeon(R) Gold 6338N CPU @ 2.20GHz",
        "vendor": "Intel Corp. [8086]",
        "businfo": businfo,
        "size": 2200000000u64,
        "configuration": {"cores": "32", "enabledcores": "32", "threads": "64"}
    })
}

fn memory_bank(id: &str) -> Value {
    json!({
        "id": id,
        "class": "memory",
        "description": "System Memory",
        "size": 274877906944u64,
        "children": [
            {"id": "bank:0", "class": "memory", "description": "DIMM DDR4",
             "vendor": "Samsung", "size": 34359738368u64},
            {"id": "bank:1", "class": "memory", "description": "DIMM DDR4",
             "vendor": "Samsung", "size": 34359738368u64}
        ]
    })
}

/// Wrap a bare data tree as a capture
pub fn wrap(node: &str, data: Value) -> Value {
    json!({"hardware": {"node": node, "data": data}})
}
